//! Maze data model and regeneration plumbing
//!
//! The maze itself comes from an external generator. This module owns the
//! grid representation, the JSON file format, and the handler that lets the
//! scene react when a new maze is swapped in.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-side wall flags for a single tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWalls {
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
}

impl TileWalls {
    /// All four walls set (a fully closed cell)
    pub const CLOSED: Self = Self {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// Number of walls set on this tile
    pub fn count(&self) -> usize {
        [self.top, self.bottom, self.left, self.right]
            .iter()
            .filter(|&&set| set)
            .count()
    }
}

/// A grid cell with a position and four wall indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Column, counted from the left edge
    pub x: u32,
    /// Row, counted from the top edge
    pub y: u32,
    #[serde(default)]
    pub walls: TileWalls,
}

/// Errors from loading or validating a maze
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("failed to read maze file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse maze file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid maze: {0}")]
    Invalid(String),
}

/// Maze description produced by the external generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub name: String,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Goal cell (column, row); a maze without one never completes
    #[serde(default)]
    pub goal: Option<(u32, u32)>,
    pub tiles: Vec<Tile>,
}

impl Maze {
    /// Parse and validate a maze from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self, MazeError> {
        let maze: Maze = serde_json::from_str(json)?;
        maze.validate()?;
        Ok(maze)
    }

    /// Load a maze file from disk
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let json = fs::read_to_string(path.as_ref())?;
        let maze = Self::from_json_str(&json)?;
        log::info!(
            "Loaded maze '{}' ({}x{}, {} tiles)",
            maze.name,
            maze.width,
            maze.height,
            maze.tiles.len()
        );
        Ok(maze)
    }

    /// Check structural invariants: positive dimensions, every tile in
    /// bounds and unique, goal (if any) in bounds
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::Invalid(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let mut seen = HashSet::new();
        for tile in &self.tiles {
            if tile.x >= self.width || tile.y >= self.height {
                return Err(MazeError::Invalid(format!(
                    "tile ({}, {}) outside {}x{} grid",
                    tile.x, tile.y, self.width, self.height
                )));
            }
            if !seen.insert((tile.x, tile.y)) {
                return Err(MazeError::Invalid(format!(
                    "duplicate tile at ({}, {})",
                    tile.x, tile.y
                )));
            }
        }

        if let Some((gx, gy)) = self.goal {
            if gx >= self.width || gy >= self.height {
                return Err(MazeError::Invalid(format!(
                    "goal ({gx}, {gy}) outside {}x{} grid",
                    self.width, self.height
                )));
            }
        }

        Ok(())
    }

    /// Look up the tile at a grid position
    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.x == x && t.y == y)
    }

    /// Tiny built-in corridor maze, used when no maze file can be loaded
    pub fn fallback() -> Self {
        let walls = |top, bottom, left, right| TileWalls {
            top,
            bottom,
            left,
            right,
        };
        Self {
            name: "fallback".into(),
            width: 2,
            height: 2,
            goal: Some((1, 1)),
            tiles: vec![
                Tile { x: 0, y: 0, walls: walls(true, true, true, false) },
                Tile { x: 1, y: 0, walls: walls(true, false, false, true) },
                Tile { x: 0, y: 1, walls: TileWalls::CLOSED },
                Tile { x: 1, y: 1, walls: walls(false, true, true, true) },
            ],
        }
    }
}

/// Observer callback invoked when the generator swaps in a new maze
pub type MazeObserver = Box<dyn FnMut(&Maze)>;

/// Owns the current maze and notifies observers on regeneration
pub struct MazeHandler {
    maze: Maze,
    observers: Vec<MazeObserver>,
}

impl MazeHandler {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            observers: Vec::new(),
        }
    }

    /// The current maze
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Register an observer for future regenerations
    pub fn subscribe(&mut self, observer: impl FnMut(&Maze) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Swap in a regenerated maze and notify observers
    pub fn replace(&mut self, maze: Maze) {
        log::info!("Maze '{}' -> '{}'", self.maze.name, maze.name);
        self.maze = maze;
        for observer in &mut self.observers {
            observer(&self.maze);
        }
    }
}
