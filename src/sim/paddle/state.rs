//! Paddle game state

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::Aabb;
use crate::tuning::PaddleTuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Ball got past the player
    GameOver,
    /// Cleared the final level
    Won,
}

/// A paddle (player on the left, AI on the right)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(x: f32, tuning: &PaddleTuning) -> Self {
        Self {
            pos: Vec2::new(x, (tuning.canvas_height - tuning.paddle_height) / 2.0),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Move vertically, staying inside `[0, max_y]`
    pub fn move_by(&mut self, dy: f32, max_y: f32) {
        self.pos.y = (self.pos.y + dy).clamp(0.0, max_y);
    }
}

/// The square ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, Vec2::splat(self.size))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Per-axis speed magnitude, the "speed" that scales with level
    #[inline]
    pub fn axis_speed(&self) -> f32 {
        self.vel.x.abs().max(self.vel.y.abs())
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaddleEvent {
    PlayerHit { score: u32 },
    AiHit,
    LevelUp { level: u32 },
    GameOver { score: u32 },
    Victory { score: u32 },
}

impl PaddleEvent {
    /// End-of-match message, if this event ends the match
    pub fn summary(&self) -> Option<String> {
        match self {
            PaddleEvent::GameOver { score } => Some(format!("Game Over! Final Score: {score}")),
            PaddleEvent::Victory { score } => Some(format!(
                "Congratulations! You've completed all levels! Final Score: {score}"
            )),
            _ => None,
        }
    }
}

/// Complete paddle game state
#[derive(Debug, Clone)]
pub struct PaddleState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: PaddleTuning,
    pub phase: GamePhase,
    /// 1..=max_level
    pub level: u32,
    /// Player paddle hits
    pub score: u32,
    pub player: Paddle,
    pub ai: Paddle,
    pub ball: Ball,
    pub frames: u64,
}

impl PaddleState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, PaddleTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: PaddleTuning) -> Self {
        let player = Paddle::new(tuning.paddle_margin, &tuning);
        let ai = Paddle::new(
            tuning.canvas_width - tuning.paddle_margin - tuning.paddle_width,
            &tuning,
        );
        let ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: tuning.ball_size,
        };
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            player,
            ai,
            ball,
            frames: 0,
        };
        state.reset_ball();
        state
    }

    /// Start a fresh match, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
    }

    /// Center the ball with the current level's speed and a random diagonal
    pub fn reset_ball(&mut self) {
        let speed = self.tuning.ball_speed_for_level(self.level);
        self.ball.pos = Vec2::new(self.tuning.canvas_width / 2.0, self.tuning.canvas_height / 2.0);
        let sx = if self.rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let sy = if self.rng.random_bool(0.5) { -1.0 } else { 1.0 };
        self.ball.vel = Vec2::new(speed * sx, speed * sy);
    }

    /// Progress bar fill, 0 at level 1 and 100 at the last level
    pub fn progress_percent(&self) -> f32 {
        if self.tuning.max_level <= 1 {
            return 100.0;
        }
        (self.level - 1) as f32 / (self.tuning.max_level - 1) as f32 * 100.0
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}
