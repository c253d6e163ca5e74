//! Player preferences
//!
//! Persisted as JSON next to the save data; the sim consumes these through
//! [`SimParams`](crate::sim::SimParams).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SimParams;
use crate::storage::{self, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Tilt control ===
    /// Accelerometer-to-force gain
    pub tilt_gain: f32,
    /// In-plane tilt magnitude (g) treated as a level device
    pub deadzone: f32,
    /// Flip horizontal response
    pub invert_x: bool,
    /// Flip vertical response
    pub invert_y: bool,

    // === Scene ===
    /// Add containment walls along the screen edges
    pub border_walls: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_gain: TILT_FORCE_GAIN,
            deadzone: TILT_DEADZONE,
            invert_x: false,
            invert_y: false,

            // The maze's own outer walls keep the marble in
            border_walls: false,

            show_fps: true,
        }
    }
}

impl Settings {
    /// The player-adjustable knobs merged with the fixed physics constants
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            tilt_gain: self.tilt_gain,
            deadzone: self.deadzone,
            invert_x: self.invert_x,
            invert_y: self.invert_y,
            ..SimParams::default()
        }
    }

    /// Load settings, falling back to defaults if the file is missing or
    /// unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match storage::load_json(path.as_ref()) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        storage::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.tilt_gain, TILT_FORCE_GAIN);
        assert_eq!(settings.deadzone, TILT_DEADZONE);
        assert!(!settings.invert_x);
        assert!(!settings.border_walls);
    }

    #[test]
    fn test_sim_params_carry_knobs() {
        let settings = Settings {
            tilt_gain: 14.0,
            invert_y: true,
            ..Default::default()
        };
        let params = settings.sim_params();
        assert_eq!(params.tilt_gain, 14.0);
        assert!(params.invert_y);
        assert!(!params.invert_x);
        assert_eq!(params.restitution, RESTITUTION);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            tilt_gain: 8.5,
            border_walls: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: Settings = serde_json::from_str(r#"{"invert_x": true}"#).unwrap();
        assert!(back.invert_x);
        assert_eq!(back.tilt_gain, TILT_FORCE_GAIN);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("tilt_maze_settings_missing.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
