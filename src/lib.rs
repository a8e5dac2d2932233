//! Canvas Arcade - two small canvas games sharing one shell
//!
//! Core modules:
//! - `sim`: Deterministic simulations (runner and paddle game)
//! - `input`: Keyboard state table
//! - `hud`: DOM text fields derived from game state
//! - `renderer`: WebGPU rendering pipeline
//! - `session`: Per-frame loop gluing input, simulation and HUD
//! - `tuning`: Data-driven game balance
//! - `headless`: Native simulator (no rendering)

pub mod headless;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{Key, KeyState};
pub use session::{EndScreen, FrameOutput, GameKind, Session};
pub use tuning::{PaddleTuning, RunnerTuning, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Runner defaults (canvas pixels, pixels/frame, milliseconds)
    pub mod runner {
        pub const CANVAS_WIDTH: f32 = 800.0;
        pub const CANVAS_HEIGHT: f32 = 400.0;

        pub const BALL_RADIUS: f32 = 20.0;
        pub const BALL_START_X: f32 = 100.0;
        pub const GRAVITY: f32 = 0.5;
        pub const JUMP_FORCE: f32 = -12.0;
        pub const DOUBLE_JUMP_FORCE: f32 = -10.0;
        pub const WALL_JUMP_FORCE: f32 = -10.0;
        /// Horizontal kick away from the wall on a wall jump
        pub const WALL_JUMP_PUSH: f32 = 5.0;
        pub const RAMP_BOOST: f32 = -18.0;
        pub const BOUNCE_PAD_FORCE: f32 = -15.0;
        pub const SLIDE_DURATION_MS: f64 = 800.0;

        pub const OBSTACLE_SPEED: f32 = 7.0;
        pub const OBSTACLE_SPAWN_RATE_MS: f64 = 1500.0;
        pub const RAMP_SPAWN_MULTIPLIER: f64 = 2.0;
        pub const WALL_SPAWN_MULTIPLIER: f64 = 3.0;
        pub const BOUNCE_PAD_SPAWN_MULTIPLIER: f64 = 4.0;

        pub const BASE_GAME_SPEED: f32 = 1.2;
        pub const GAME_SPEED_PER_LEVEL: f32 = 0.3;
        pub const DISTANCE_PER_LEVEL: f32 = 1000.0;

        pub const SPECIAL_ATTACK_COOLDOWN_MS: f64 = 5000.0;
        pub const SPECIAL_ATTACK_DISTANCE: f32 = 5000.0;

        /// Vertical travel of a moving obstacle before it reverses
        pub const MOVING_OBSTACLE_RANGE: f32 = 100.0;
        pub const MOVING_OBSTACLE_STEP: f32 = 2.0;
    }

    /// Paddle game defaults (canvas pixels, pixels/frame)
    pub mod paddle {
        pub const CANVAS_WIDTH: f32 = 800.0;
        pub const CANVAS_HEIGHT: f32 = 400.0;

        pub const PADDLE_WIDTH: f32 = 15.0;
        pub const PADDLE_HEIGHT: f32 = 100.0;
        /// Gap between a paddle and its side of the canvas
        pub const PADDLE_MARGIN: f32 = 20.0;
        pub const PADDLE_SPEED: f32 = 8.0;

        pub const BALL_SIZE: f32 = 10.0;
        pub const INITIAL_BALL_SPEED: f32 = 5.0;
        pub const BALL_SPEED_PER_LEVEL: f32 = 0.5;
        /// Horizontal speed gained on every paddle hit
        pub const PADDLE_HIT_SPEEDUP: f32 = 0.5;
        /// Vertical deflection per pixel of offset from paddle center
        pub const DEFLECTION_FACTOR: f32 = 0.1;

        pub const AI_BASE_DIFFICULTY: f32 = 0.3;
        pub const AI_DIFFICULTY_PER_LEVEL: f32 = 0.07;
        /// Half-width of the band around the ball where the AI holds still
        pub const AI_DEAD_ZONE: f32 = 10.0;

        pub const MAX_LEVEL: u32 = 10;
    }
}
