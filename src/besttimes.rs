//! Fastest-solve leaderboard
//!
//! Tracks the best completion times per maze, fastest first, capped at
//! [`MAX_BEST_TIMES`] entries each.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::storage::{self, StorageError};

/// Maximum number of times kept per maze
pub const MAX_BEST_TIMES: usize = 10;

/// A single recorded solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimeEntry {
    /// Maze the time was set on
    pub maze: String,
    /// Solve duration in simulation ticks
    pub ticks: u64,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

impl BestTimeEntry {
    /// Solve duration in seconds
    pub fn secs(&self) -> f32 {
        self.ticks as f32 * SIM_DT
    }
}

/// Best-times leaderboard across all mazes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestTimes {
    pub entries: Vec<BestTimeEntry>,
}

impl BestTimes {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn for_maze<'a>(&'a self, maze: &'a str) -> impl Iterator<Item = &'a BestTimeEntry> {
        self.entries.iter().filter(move |e| e.maze == maze)
    }

    /// Check if a solve time qualifies for a maze's board
    pub fn qualifies(&self, maze: &str, ticks: u64) -> bool {
        if ticks == 0 {
            return false;
        }
        let times: Vec<_> = self.for_maze(maze).collect();
        if times.len() < MAX_BEST_TIMES {
            return true;
        }
        // Must beat the slowest kept time
        times.last().map(|e| ticks < e.ticks).unwrap_or(true)
    }

    /// Get the rank a time would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, maze: &str, ticks: u64) -> Option<usize> {
        if !self.qualifies(maze, ticks) {
            return None;
        }
        let rank = self.for_maze(maze).position(|e| ticks < e.ticks);
        Some(rank.unwrap_or_else(|| self.for_maze(maze).count()) + 1)
    }

    /// Record a solve (if it qualifies). Returns the rank achieved
    /// (1-indexed) or None if it didn't make the board.
    pub fn add_time(&mut self, maze: &str, ticks: u64, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(maze, ticks)?;

        self.entries.push(BestTimeEntry {
            maze: maze.to_string(),
            ticks,
            timestamp,
        });
        // Keep entries grouped by maze, fastest first
        self.entries
            .sort_by(|a, b| a.maze.cmp(&b.maze).then(a.ticks.cmp(&b.ticks)));

        // Trim each maze's list to the cap
        let mut current = String::new();
        let mut kept = 0;
        self.entries.retain(|e| {
            if e.maze != current {
                current = e.maze.clone();
                kept = 0;
            }
            kept += 1;
            kept <= MAX_BEST_TIMES
        });

        Some(rank)
    }

    /// Fastest recorded time for a maze, in ticks
    pub fn top_time(&self, maze: &str) -> Option<u64> {
        self.for_maze(maze).map(|e| e.ticks).min()
    }

    /// Check if the whole leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the leaderboard, starting fresh if the file is missing or
    /// unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match storage::load_json(path.as_ref()) {
            Ok(times) => times,
            Err(err) => {
                log::info!("No best times found, starting fresh ({err})");
                Self::new()
            }
        }
    }

    /// Save the leaderboard to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        storage::save_json(path, self)?;
        log::info!("Best times saved ({} entries)", self.entries.len());
        Ok(())
    }
}
