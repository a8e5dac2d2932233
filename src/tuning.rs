//! Data-driven game balance
//!
//! Forces, speeds, canvas sizes and timings live in tuning structs.
//! Entity sizes and the moving-obstacle bob stay fixed in the runner state.
//! Defaults come from [`crate::consts`]; a page or the headless tool can
//! override any subset of fields with JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{paddle, runner};
use crate::sim::runner::state::tallest_entity_height;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runner balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ball_radius: f32,
    pub ball_start_x: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub double_jump_force: f32,
    pub wall_jump_force: f32,
    pub wall_jump_push: f32,
    pub ramp_boost: f32,
    pub bounce_pad_force: f32,
    pub slide_duration_ms: f64,
    pub obstacle_speed: f32,
    pub obstacle_spawn_rate_ms: f64,
    pub ramp_spawn_multiplier: f64,
    pub wall_spawn_multiplier: f64,
    pub bounce_pad_spawn_multiplier: f64,
    pub base_game_speed: f32,
    pub game_speed_per_level: f32,
    pub distance_per_level: f32,
    pub special_attack_cooldown_ms: f64,
    pub special_attack_distance: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            canvas_width: runner::CANVAS_WIDTH,
            canvas_height: runner::CANVAS_HEIGHT,
            ball_radius: runner::BALL_RADIUS,
            ball_start_x: runner::BALL_START_X,
            gravity: runner::GRAVITY,
            jump_force: runner::JUMP_FORCE,
            double_jump_force: runner::DOUBLE_JUMP_FORCE,
            wall_jump_force: runner::WALL_JUMP_FORCE,
            wall_jump_push: runner::WALL_JUMP_PUSH,
            ramp_boost: runner::RAMP_BOOST,
            bounce_pad_force: runner::BOUNCE_PAD_FORCE,
            slide_duration_ms: runner::SLIDE_DURATION_MS,
            obstacle_speed: runner::OBSTACLE_SPEED,
            obstacle_spawn_rate_ms: runner::OBSTACLE_SPAWN_RATE_MS,
            ramp_spawn_multiplier: runner::RAMP_SPAWN_MULTIPLIER,
            wall_spawn_multiplier: runner::WALL_SPAWN_MULTIPLIER,
            bounce_pad_spawn_multiplier: runner::BOUNCE_PAD_SPAWN_MULTIPLIER,
            base_game_speed: runner::BASE_GAME_SPEED,
            game_speed_per_level: runner::GAME_SPEED_PER_LEVEL,
            distance_per_level: runner::DISTANCE_PER_LEVEL,
            special_attack_cooldown_ms: runner::SPECIAL_ATTACK_COOLDOWN_MS,
            special_attack_distance: runner::SPECIAL_ATTACK_DISTANCE,
        }
    }
}

impl RunnerTuning {
    /// Y coordinate of the ball center when resting on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.canvas_height - self.ball_radius
    }

    /// Game speed multiplier for a level (level 1 = base speed)
    pub fn game_speed_for_level(&self, level: u32) -> f32 {
        self.base_game_speed + level.saturating_sub(1) as f32 * self.game_speed_per_level
    }

    /// Level reached after running `distance`
    pub fn level_for_distance(&self, distance: f32) -> u32 {
        (distance / self.distance_per_level).floor() as u32 + 1
    }

    fn validate(&self) -> Result<(), TuningError> {
        positive("runner.canvas_width", self.canvas_width)?;
        positive("runner.canvas_height", self.canvas_height)?;
        positive("runner.ball_radius", self.ball_radius)?;
        positive("runner.obstacle_speed", self.obstacle_speed)?;
        positive("runner.base_game_speed", self.base_game_speed)?;
        positive("runner.distance_per_level", self.distance_per_level)?;
        positive("runner.special_attack_distance", self.special_attack_distance)?;
        positive("runner.gravity", self.gravity)?;
        upward("runner.jump_force", self.jump_force)?;
        upward("runner.double_jump_force", self.double_jump_force)?;
        if self.obstacle_spawn_rate_ms <= 0.0 {
            return Err(TuningError::Invalid(
                "runner.obstacle_spawn_rate_ms must be positive".into(),
            ));
        }
        let multipliers = [
            self.ramp_spawn_multiplier,
            self.wall_spawn_multiplier,
            self.bounce_pad_spawn_multiplier,
        ];
        if multipliers.iter().any(|m| *m <= 0.0) {
            return Err(TuningError::Invalid(
                "runner spawn multipliers must be positive".into(),
            ));
        }
        if self.game_speed_per_level < 0.0 {
            return Err(TuningError::Invalid(
                "runner.game_speed_per_level must not be negative".into(),
            ));
        }
        if self.ball_radius * 2.0 >= self.canvas_height {
            return Err(TuningError::Invalid(
                "runner ball does not fit on the canvas".into(),
            ));
        }
        if tallest_entity_height() >= self.canvas_height {
            return Err(TuningError::Invalid(
                "runner canvas is shorter than its tallest entity".into(),
            ));
        }
        Ok(())
    }
}

/// Paddle game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub initial_ball_speed: f32,
    pub ball_speed_per_level: f32,
    pub paddle_hit_speedup: f32,
    pub deflection_factor: f32,
    pub ai_base_difficulty: f32,
    pub ai_difficulty_per_level: f32,
    pub ai_dead_zone: f32,
    pub max_level: u32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            canvas_width: paddle::CANVAS_WIDTH,
            canvas_height: paddle::CANVAS_HEIGHT,
            paddle_width: paddle::PADDLE_WIDTH,
            paddle_height: paddle::PADDLE_HEIGHT,
            paddle_margin: paddle::PADDLE_MARGIN,
            paddle_speed: paddle::PADDLE_SPEED,
            ball_size: paddle::BALL_SIZE,
            initial_ball_speed: paddle::INITIAL_BALL_SPEED,
            ball_speed_per_level: paddle::BALL_SPEED_PER_LEVEL,
            paddle_hit_speedup: paddle::PADDLE_HIT_SPEEDUP,
            deflection_factor: paddle::DEFLECTION_FACTOR,
            ai_base_difficulty: paddle::AI_BASE_DIFFICULTY,
            ai_difficulty_per_level: paddle::AI_DIFFICULTY_PER_LEVEL,
            ai_dead_zone: paddle::AI_DEAD_ZONE,
            max_level: paddle::MAX_LEVEL,
        }
    }
}

impl PaddleTuning {
    /// Per-axis ball speed at the start of a level
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.initial_ball_speed + level.saturating_sub(1) as f32 * self.ball_speed_per_level
    }

    /// AI tracking multiplier for a level (0.3 at level 1, 0.93 at level 10)
    pub fn ai_difficulty(&self, level: u32) -> f32 {
        self.ai_base_difficulty + level.saturating_sub(1) as f32 * self.ai_difficulty_per_level
    }

    /// Lowest legal paddle y
    #[inline]
    pub fn max_paddle_y(&self) -> f32 {
        self.canvas_height - self.paddle_height
    }

    fn validate(&self) -> Result<(), TuningError> {
        positive("paddle.canvas_width", self.canvas_width)?;
        positive("paddle.canvas_height", self.canvas_height)?;
        positive("paddle.paddle_width", self.paddle_width)?;
        positive("paddle.paddle_height", self.paddle_height)?;
        positive("paddle.paddle_speed", self.paddle_speed)?;
        positive("paddle.ball_size", self.ball_size)?;
        positive("paddle.initial_ball_speed", self.initial_ball_speed)?;
        if self.ball_speed_per_level <= 0.0 {
            return Err(TuningError::Invalid(
                "paddle.ball_speed_per_level must be positive".into(),
            ));
        }
        if self.paddle_height >= self.canvas_height {
            return Err(TuningError::Invalid(
                "paddle does not fit on the canvas".into(),
            ));
        }
        if 2.0 * (self.paddle_margin + self.paddle_width) >= self.canvas_width {
            return Err(TuningError::Invalid("paddles overlap".into()));
        }
        if self.ball_size >= self.canvas_height {
            return Err(TuningError::Invalid(
                "paddle ball does not fit on the canvas".into(),
            ));
        }
        // Served from the center, the ball must start clear of both paddles
        let serve_x = self.canvas_width / 2.0;
        let ai_x = self.canvas_width - self.paddle_margin - self.paddle_width;
        if serve_x + self.ball_size >= ai_x || serve_x <= self.paddle_margin + self.paddle_width {
            return Err(TuningError::Invalid(
                "paddle ball overlaps a paddle when served".into(),
            ));
        }
        if self.max_level == 0 {
            return Err(TuningError::Invalid("paddle.max_level must be at least 1".into()));
        }
        Ok(())
    }
}

/// Tuning for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub paddle: PaddleTuning,
}

impl Tuning {
    /// Parse and validate tuning JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning JSON from a file
    pub fn from_file(path: &str) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.runner.validate()?;
        self.paddle.validate()
    }
}

fn positive(name: &str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid(format!("{name} must be positive")))
    }
}

/// Upward forces are negative (y grows downward)
fn upward(name: &str, value: f32) -> Result<(), TuningError> {
    if value < 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid(format!("{name} must be negative")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "runner": { "gravity": 0.8 } }"#).unwrap();
        assert_eq!(tuning.runner.gravity, 0.8);
        assert_eq!(tuning.runner.jump_force, runner::JUMP_FORCE);
        assert_eq!(tuning.paddle, PaddleTuning::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ runner: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_oversized_paddle_rejected() {
        let err = Tuning::from_json(r#"{ "paddle": { "paddle_height": 500.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_oversized_ball_rejected() {
        let err = Tuning::from_json(r#"{ "paddle": { "ball_size": 500.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
        // Fits vertically but the serve would overlap the AI paddle
        let err = Tuning::from_json(r#"{ "paddle": { "ball_size": 370.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_flat_or_downward_forces_rejected() {
        for json in [
            r#"{ "runner": { "gravity": 0.0 } }"#,
            r#"{ "runner": { "gravity": -0.5 } }"#,
            r#"{ "runner": { "jump_force": 0.0 } }"#,
            r#"{ "runner": { "double_jump_force": 4.0 } }"#,
        ] {
            assert!(
                matches!(Tuning::from_json(json), Err(TuningError::Invalid(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_canvas_shorter_than_wall_rejected() {
        // Fits the ball (radius 20) but not the 100px wall
        let err = Tuning::from_json(r#"{ "runner": { "canvas_height": 90.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_zero_max_level_rejected() {
        assert!(Tuning::from_json(r#"{ "paddle": { "max_level": 0 } }"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_speed_curves() {
        let r = RunnerTuning::default();
        assert!((r.game_speed_for_level(1) - 1.2).abs() < 1e-6);
        assert!((r.game_speed_for_level(3) - 1.8).abs() < 1e-6);
        assert_eq!(r.level_for_distance(0.0), 1);
        assert_eq!(r.level_for_distance(999.9), 1);
        assert_eq!(r.level_for_distance(1000.0), 2);

        let p = PaddleTuning::default();
        assert!((p.ball_speed_for_level(1) - 5.0).abs() < 1e-6);
        assert!((p.ball_speed_for_level(10) - 9.5).abs() < 1e-6);
        assert!((p.ai_difficulty(10) - 0.93).abs() < 1e-5);
    }
}
