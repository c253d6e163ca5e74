//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable wall iteration order (scene build order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod tilt;

pub use collision::{CollisionResult, ball_rect_collision, reflect_velocity};
pub use state::{GamePhase, GameState, Marble, SimParams};
pub use tick::{TickInput, tick};
pub use tilt::{ConstantTilt, TiltSample, TiltSource, tilt_force, tilt_force_with};
