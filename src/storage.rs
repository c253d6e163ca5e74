//! JSON file persistence
//!
//! Small save/load layer shared by settings and best times. Writes go to a
//! temporary file first and are renamed into place so an interrupted save
//! never clobbers the previous one.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors from loading or saving a JSON file
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, StorageError> {
    let json = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&json)?)
}

/// Serialize a value and write it to disk (tmp file, then rename)
pub fn save_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), StorageError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::debug!("Saved {}", path.display());
    Ok(())
}
