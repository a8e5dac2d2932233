//! BallRunner: endless side-scroller
//!
//! The ball stays near the left edge while obstacles, ramps, walls and
//! bounce pads scroll in from the right. Speed rises with distance.

pub mod collision;
pub mod spawn;
pub mod special;
pub mod state;
pub mod tick;

pub use special::{SpecialStatus, special_status};
pub use state::{
    Ball, BouncePad, GamePhase, Obstacle, ObstacleKind, Ramp, RampKind, RunnerEvent, RunnerState,
    Scrolling, Wall,
};
pub use tick::{RunnerInput, tick};
