//! Fixed timestep simulation tick
//!
//! Advances the marble deterministically: tilt force in, integration,
//! wall collisions, goal detection.

use super::collision::{ball_rect_collision, reflect_velocity};
use super::state::{GamePhase, GameState};
use super::tilt::{TiltSample, tilt_force_with};

/// Extra separation applied after a positional correction
const CONTACT_SLOP: f32 = 0.1;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest accelerometer reading, if the sensor has produced one
    pub tilt: Option<TiltSample>,
    /// Put the marble back at the spawn point (double-tap upstream)
    pub reset: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Pause toggle first so a paused game can still resume
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::Solved => {}
        }
    }

    // Reset works from any phase
    if input.reset {
        state.reset_marble();
        state.phase = GamePhase::Playing;
    }

    match state.phase {
        GamePhase::Paused | GamePhase::Solved => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.run_ticks += 1;

    let params = state.params;
    let mut marble = state.marble;

    // Tilt force -> acceleration. No sample yet means no force.
    if let Some(sample) = input.tilt {
        let force = tilt_force_with(
            sample,
            params.tilt_gain,
            params.deadzone,
            params.invert_x,
            params.invert_y,
        );
        marble.vel += force / marble.mass * dt;
    }

    // Rolling drag, then clamp so substepping stays honest
    marble.vel *= 1.0 - params.linear_damping * dt;
    let speed = marble.vel.length();
    if speed > params.max_speed {
        marble.vel = marble.vel / speed * params.max_speed;
    }

    // Substepped move-and-collide so a fast marble cannot skip a thin wall
    let travel = speed.min(params.max_speed) * dt;
    let step_size = marble.radius * 0.3;
    let num_steps = ((travel / step_size).ceil() as usize).clamp(1, 20);
    let step_dt = dt / num_steps as f32;

    for _ in 0..num_steps {
        marble.pos += marble.vel * step_dt;

        for wall in &state.walls {
            let result = ball_rect_collision(marble.pos, marble.radius, wall);
            if result.hit {
                // Only reflect when moving into the wall; always separate
                if marble.vel.dot(result.normal) < 0.0 {
                    marble.vel =
                        reflect_velocity(marble.vel, result.normal, params.restitution);
                }
                marble.pos += result.normal * (result.penetration + CONTACT_SLOP);
                break; // one contact per substep
            }
        }
    }

    // Goal detection: solved once the marble center enters the goal cell
    if let Some(goal) = &state.goal {
        if goal.contains_point(marble.pos) {
            state.phase = GamePhase::Solved;
            log::info!(
                "Maze '{}' solved in {} ticks",
                state.maze_name,
                state.run_ticks
            );
        }
    }

    state.marble = marble;
}
