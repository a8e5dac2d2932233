//! Paddle game: the player defends the left edge against a tracking AI
//!
//! Getting the ball past the AI advances a level (faster ball, sharper AI);
//! letting it past the player ends the match.

pub mod ai;
pub mod state;
pub mod tick;

pub use ai::{track_ball, tracking_direction};
pub use state::{Ball, GamePhase, Paddle, PaddleEvent, PaddleState};
pub use tick::{PaddleInput, tick};
