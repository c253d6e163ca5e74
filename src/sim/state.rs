//! Game state and core simulation types
//!
//! Everything needed to rebuild or persist a session lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::layout::{self, SceneMetrics, WallRect};
use crate::maze::Maze;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Marble free, tilt forces active
    Playing,
    /// Simulation frozen
    Paused,
    /// Marble reached the goal cell
    Solved,
}

/// The player's marble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

/// Physical tuning for the marble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Accelerometer-to-force gain
    pub tilt_gain: f32,
    /// In-plane tilt magnitude (g) below which input is ignored
    pub deadzone: f32,
    /// Flip horizontal response
    pub invert_x: bool,
    /// Flip vertical response
    pub invert_y: bool,
    /// Fraction of velocity lost per second
    pub linear_damping: f32,
    /// Energy retained on wall bounce
    pub restitution: f32,
    /// Speed clamp (world units/s)
    pub max_speed: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            tilt_gain: TILT_FORCE_GAIN,
            deadzone: TILT_DEADZONE,
            invert_x: false,
            invert_y: false,
            linear_damping: LINEAR_DAMPING,
            restitution: RESTITUTION,
            max_speed: MARBLE_MAX_SPEED,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the marble was last reset
    pub run_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player's marble
    pub marble: Marble,
    /// Wall colliders, maze walls first then any border walls
    pub walls: Vec<WallRect>,
    /// Scene measurements the walls were built from
    pub metrics: SceneMetrics,
    /// Name of the loaded maze (keys the best-times board)
    pub maze_name: String,
    /// World rect of the goal cell, if the maze has one
    pub goal: Option<WallRect>,
    /// Physical tuning
    pub params: SimParams,
}

impl GameState {
    /// Build the scene for a maze
    pub fn new(maze: &Maze, scene: Vec2, params: SimParams, with_border: bool) -> Self {
        let metrics = SceneMetrics::for_maze(scene, maze);
        let (pos, radius) = layout::marble_spawn(&metrics);
        let mut state = Self {
            time_ticks: 0,
            run_ticks: 0,
            phase: GamePhase::Playing,
            marble: Marble {
                pos,
                vel: Vec2::ZERO,
                radius,
                mass: MARBLE_MASS,
            },
            walls: Vec::new(),
            metrics,
            maze_name: maze.name.clone(),
            goal: None,
            params,
        };
        state.load_maze(maze, with_border);
        state
    }

    /// Swap in a regenerated maze: rebuild geometry and reset the marble
    pub fn load_maze(&mut self, maze: &Maze, with_border: bool) {
        self.metrics = SceneMetrics::for_maze(self.metrics.scene, maze);
        self.walls = layout::build_walls(&self.metrics, maze);
        if with_border {
            self.walls
                .extend(layout::border_walls(self.metrics.scene, BORDER_WALL_THICKNESS));
        }
        self.goal = layout::goal_rect(&self.metrics, maze);
        self.maze_name = maze.name.clone();
        self.phase = GamePhase::Playing;
        self.reset_marble();
        log::debug!(
            "Scene built for '{}': {} walls, marble r={:.1}",
            self.maze_name,
            self.walls.len(),
            self.marble.radius
        );
    }

    /// Put the marble back at the spawn point with no velocity
    pub fn reset_marble(&mut self) {
        let (pos, radius) = layout::marble_spawn(&self.metrics);
        self.marble.pos = pos;
        self.marble.vel = Vec2::ZERO;
        self.marble.radius = radius;
        self.run_ticks = 0;
    }
}
