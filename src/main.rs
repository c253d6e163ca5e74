//! Tilt Maze entry point
//!
//! Headless demo driver: loads a maze, wires the regeneration handler, and
//! runs the fixed-timestep loop with a scripted tilt source standing in for
//! the device accelerometer.

use std::cell::RefCell;
use std::env;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tilt_maze::consts::*;
use tilt_maze::maze::{Maze, MazeHandler};
use tilt_maze::sim::{GamePhase, GameState, TickInput, TiltSample, TiltSource, tick};
use tilt_maze::{BestTimes, Settings};

const SETTINGS_PATH: &str = "tilt_maze_settings.json";
const BEST_TIMES_PATH: &str = "tilt_maze_best_times.json";

/// Demo run length before the autopilot gives up (simulated seconds)
const MAX_DEMO_SECS: u64 = 60;

/// Scripted tilt source: leans toward a target with a bit of hand shake
struct Autopilot {
    rng: Pcg32,
    target: Vec2,
    marble_pos: Vec2,
}

impl Autopilot {
    fn new(seed: u64, target: Vec2) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            target,
            marble_pos: Vec2::ZERO,
        }
    }

    /// Tell the pilot where the marble currently is
    fn track(&mut self, marble_pos: Vec2) {
        self.marble_pos = marble_pos;
    }
}

impl TiltSource for Autopilot {
    fn latest(&mut self) -> Option<TiltSample> {
        let dir = (self.target - self.marble_pos).normalize_or_zero();
        let lean = 0.6;
        // Invert the portrait mapping: screen force (x, y) <- (-ay, ax)
        Some(TiltSample::new(
            dir.y * lean + self.rng.random_range(-0.05..0.05),
            -dir.x * lean + self.rng.random_range(-0.05..0.05),
            -1.0,
        ))
    }
}

/// Drive one maze attempt to completion or timeout
fn run_session(state: &Rc<RefCell<GameState>>, pilot: &mut Autopilot) -> GamePhase {
    let frame_dt = 1.0 / 60.0;
    let max_ticks = MAX_DEMO_SECS * 120;
    let mut accumulator = 0.0f32;
    let mut last_logged_sec = 0;

    loop {
        {
            let s = state.borrow();
            if s.phase == GamePhase::Solved || s.run_ticks >= max_ticks {
                return s.phase;
            }
            let sec = s.run_ticks / 120;
            if sec > last_logged_sec {
                last_logged_sec = sec;
                log::debug!("t={:>2}s marble at {:.0}", sec, s.marble.pos);
            }
        }

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            pilot.track(state.borrow().marble.pos);
            let input = TickInput {
                tilt: pilot.latest(),
                ..Default::default()
            };
            tick(&mut state.borrow_mut(), &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

/// Run a session on the current scene and record the result
fn play(state: &Rc<RefCell<GameState>>, best_times: &mut BestTimes, seed: u64) {
    let target = {
        let s = state.borrow();
        s.goal.map(|g| g.center).unwrap_or(s.metrics.scene / 2.0)
    };
    let mut pilot = Autopilot::new(seed, target);
    let phase = run_session(state, &mut pilot);

    let s = state.borrow();
    if phase == GamePhase::Solved {
        log::info!(
            "Solved '{}' in {:.1}s",
            s.maze_name,
            s.run_ticks as f32 * SIM_DT
        );
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if let Some(rank) = best_times.add_time(&s.maze_name, s.run_ticks, now) {
            log::info!("New best time for '{}' (rank {rank})", s.maze_name);
            if let Err(err) = best_times.save(BEST_TIMES_PATH) {
                log::warn!("Could not save best times: {err}");
            }
        }
    } else {
        log::info!(
            "Autopilot gave up on '{}' after {}s",
            s.maze_name,
            MAX_DEMO_SECS
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Tilt Maze starting...");

    let settings = Settings::load_or_default(SETTINGS_PATH);

    let maze_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "mazes/first.json".to_string());
    let maze = match Maze::load_from_file(&maze_path) {
        Ok(maze) => maze,
        Err(err) => {
            log::warn!("Could not load '{maze_path}': {err} - using the built-in maze");
            Maze::fallback()
        }
    };
    let started_on_fallback = maze.name == "fallback";

    let scene = Vec2::new(SCENE_WIDTH, SCENE_HEIGHT);
    let state = Rc::new(RefCell::new(GameState::new(
        &maze,
        scene,
        settings.sim_params(),
        settings.border_walls,
    )));

    // Regeneration wiring: a replaced maze rebuilds the scene in place
    let mut handler = MazeHandler::new(maze);
    {
        let state = state.clone();
        let border = settings.border_walls;
        handler.subscribe(move |maze| state.borrow_mut().load_maze(maze, border));
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Autopilot seed: {seed}");

    let mut best_times = BestTimes::load_or_default(BEST_TIMES_PATH);

    play(&state, &mut best_times, seed);

    // Swap in the built-in maze to exercise live regeneration
    if !started_on_fallback {
        handler.replace(Maze::fallback());
        play(&state, &mut best_times, seed.wrapping_add(1));
    }
}
