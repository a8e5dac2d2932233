//! Headless simulator
//!
//! Runs either game natively without a canvas, driven by a simple autopilot
//! (or no input at all with `--idle`), and reports a JSON summary. Useful
//! for checking balance changes in a tuning file.

use serde::Serialize;
use thiserror::Error;

use crate::session::{GameKind, UnknownGame};
use crate::sim::paddle::{self, PaddleEvent, PaddleInput, PaddleState, tracking_direction};
use crate::sim::runner::{self, ObstacleKind, RunnerEvent, RunnerInput, RunnerState};
use crate::tuning::{Tuning, TuningError};

/// Frame length used to synthesize timestamps (60 fps)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

pub const USAGE: &str = "\
Usage: canvas-arcade [OPTIONS]

Options:
  --game <runner|paddle>  Game to simulate [default: runner]
  --frames <N>            Frame limit [default: 36000]
  --seed <N>              RNG seed [default: 0]
  --tuning <FILE>         Tuning JSON overriding the defaults
  --idle                  Send no input at all
  -h, --help              Print this help";

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("{0} expects a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
    #[error(transparent)]
    Game(#[from] UnknownGame),
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("failed to encode run summary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Command line configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessConfig {
    pub game: GameKind,
    pub frames: u64,
    pub seed: u64,
    pub tuning_path: Option<String>,
    pub idle: bool,
    pub help: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            game: GameKind::Runner,
            frames: 36_000,
            seed: 0,
            tuning_path: None,
            idle: false,
            help: false,
        }
    }
}

impl HeadlessConfig {
    /// Parse the process arguments
    pub fn from_args() -> Result<Self, HeadlessError> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse arguments (program name already stripped)
    pub fn parse<I>(args: I) -> Result<Self, HeadlessError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--game" => config.game = value(&arg, args.next())?.parse()?,
                "--frames" => config.frames = parse_number(&arg, args.next())?,
                "--seed" => config.seed = parse_number(&arg, args.next())?,
                "--tuning" => config.tuning_path = Some(value(&arg, args.next())?),
                "--idle" => config.idle = true,
                "-h" | "--help" => config.help = true,
                _ => return Err(HeadlessError::UnknownArgument(arg)),
            }
        }
        Ok(config)
    }

    /// Tuning from `--tuning`, or the defaults
    pub fn load_tuning(&self) -> Result<Tuning, HeadlessError> {
        match &self.tuning_path {
            Some(path) => Ok(Tuning::from_file(path)?),
            None => Ok(Tuning::default()),
        }
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, HeadlessError> {
    next.ok_or_else(|| HeadlessError::MissingValue(flag.to_string()))
}

fn parse_number<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T, HeadlessError> {
    let raw = value(flag, next)?;
    raw.parse().map_err(|_| HeadlessError::InvalidValue {
        flag: flag.to_string(),
        value: raw,
    })
}

/// Outcome of one simulated run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub game: String,
    pub seed: u64,
    pub frames: u64,
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub level_ups: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_attacks: Option<u32>,
    /// End-of-game message, `None` if the frame limit was hit first
    pub game_over: Option<String>,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String, HeadlessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Simulate until the game ends or the frame limit is reached
pub fn run(config: &HeadlessConfig, tuning: &Tuning) -> RunSummary {
    log::info!(
        "Simulating {} (seed {}, up to {} frames{})",
        config.game,
        config.seed,
        config.frames,
        if config.idle { ", idle" } else { "" }
    );
    match config.game {
        GameKind::Runner => run_runner(config, tuning),
        GameKind::Paddle => run_paddle(config, tuning),
    }
}

fn run_runner(config: &HeadlessConfig, tuning: &Tuning) -> RunSummary {
    let mut state = RunnerState::with_tuning(config.seed, tuning.runner.clone());
    let mut summary = RunSummary {
        game: GameKind::Runner.to_string(),
        seed: config.seed,
        special_attacks: Some(0),
        ..Default::default()
    };

    for frame in 0..config.frames {
        let now_ms = frame as f64 * FRAME_MS;
        let input = if config.idle {
            RunnerInput::at(now_ms)
        } else {
            runner_autopilot(&state, now_ms)
        };
        for event in runner::tick(&mut state, &input) {
            match event {
                RunnerEvent::LevelUp { .. } => summary.level_ups += 1,
                RunnerEvent::SpecialAttackUsed { .. } => {
                    if let Some(n) = summary.special_attacks.as_mut() {
                        *n += 1;
                    }
                }
                RunnerEvent::GameOver { .. } => summary.game_over = event.summary(),
                RunnerEvent::SpecialAttackArmed => {}
            }
        }
        if state.is_over() {
            break;
        }
    }

    summary.frames = state.frames;
    summary.level = state.level;
    summary.distance = Some(state.distance.floor() as u32);
    summary
}

fn run_paddle(config: &HeadlessConfig, tuning: &Tuning) -> RunSummary {
    let mut state = PaddleState::with_tuning(config.seed, tuning.paddle.clone());
    let mut summary = RunSummary {
        game: GameKind::Paddle.to_string(),
        seed: config.seed,
        ..Default::default()
    };

    for _ in 0..config.frames {
        let input = if config.idle {
            PaddleInput::default()
        } else {
            paddle_autopilot(&state)
        };
        for event in paddle::tick(&mut state, &input) {
            match event {
                PaddleEvent::LevelUp { .. } => summary.level_ups += 1,
                PaddleEvent::GameOver { .. } | PaddleEvent::Victory { .. } => {
                    summary.game_over = event.summary()
                }
                PaddleEvent::PlayerHit { .. } | PaddleEvent::AiHit => {}
            }
        }
        if state.is_over() {
            break;
        }
    }

    summary.frames = state.frames;
    summary.level = state.level;
    summary.score = Some(state.score);
    summary
}

/// Chase the ball with the player paddle at full speed
pub fn paddle_autopilot(state: &PaddleState) -> PaddleInput {
    let direction = tracking_direction(&state.player, &state.ball, state.tuning.ai_dead_zone);
    PaddleInput {
        up: direction < 0.0,
        down: direction > 0.0,
    }
}

/// React to the nearest obstacle ahead of the ball.
///
/// Breakables are cleared with the special attack when it is armed, slide
/// obstacles are slid under, everything else is jumped.
pub fn runner_autopilot(state: &RunnerState, now_ms: f64) -> RunnerInput {
    let mut input = RunnerInput::at(now_ms);
    let ball = &state.ball;
    if ball.is_jumping || ball.is_sliding {
        return input;
    }

    let step = state.tuning.obstacle_speed * state.game_speed;
    let front = ball.pos.x + ball.radius;
    let Some((gap, kind)) = state
        .obstacles
        .iter()
        .filter(|o| !o.is_broken && o.pos.x + o.size.x >= ball.pos.x - ball.radius)
        .map(|o| (o.pos.x - front, o.kind))
        .min_by(|a, b| a.0.total_cmp(&b.0))
    else {
        return input;
    };

    match kind {
        ObstacleKind::Breakable if ball.has_special_attack => input.special = true,
        ObstacleKind::Slide => input.slide = gap <= step * 6.0,
        _ => input.jump = gap <= step * 12.0,
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let config = HeadlessConfig::parse(Vec::new()).unwrap();
        assert_eq!(config, HeadlessConfig::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let config = HeadlessConfig::parse(args(&[
            "--game", "paddle", "--frames", "500", "--seed", "42", "--tuning", "t.json", "--idle",
        ]))
        .unwrap();
        assert_eq!(config.game, GameKind::Paddle);
        assert_eq!(config.frames, 500);
        assert_eq!(config.seed, 42);
        assert_eq!(config.tuning_path.as_deref(), Some("t.json"));
        assert!(config.idle);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            HeadlessConfig::parse(args(&["--frames"])),
            Err(HeadlessError::MissingValue(_))
        ));
        assert!(matches!(
            HeadlessConfig::parse(args(&["--seed", "abc"])),
            Err(HeadlessError::InvalidValue { .. })
        ));
        assert!(matches!(
            HeadlessConfig::parse(args(&["--game", "chess"])),
            Err(HeadlessError::Game(_))
        ));
        assert!(matches!(
            HeadlessConfig::parse(args(&["--fast"])),
            Err(HeadlessError::UnknownArgument(_))
        ));
    }

    #[test]
    fn test_idle_runner_crashes_into_first_obstacle() {
        let config = HeadlessConfig {
            idle: true,
            ..Default::default()
        };
        let summary = run(&config, &Tuning::default());
        let message = summary.game_over.expect("idle runner should crash");
        assert!(message.starts_with("Game Over! You ran"));
        assert!(summary.frames < 600);
        assert_eq!(summary.level, 1);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let config = HeadlessConfig {
            frames: 2_000,
            seed: 9,
            ..Default::default()
        };
        let a = run(&config, &Tuning::default());
        let b = run(&config, &Tuning::default());
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.game_over, b.game_over);
    }

    #[test]
    fn test_frame_limit_respected() {
        let config = HeadlessConfig {
            game: GameKind::Paddle,
            frames: 10,
            ..Default::default()
        };
        let summary = run(&config, &Tuning::default());
        assert_eq!(summary.frames, 10);
        assert!(summary.game_over.is_none());
        assert_eq!(summary.score, Some(0));
    }

    #[test]
    fn test_paddle_autopilot_directions() {
        let mut state = PaddleState::new(1);
        state.ball.pos.y = 10.0;
        assert!(paddle_autopilot(&state).up);
        state.ball.pos.y = 380.0;
        assert!(paddle_autopilot(&state).down);
    }

    #[test]
    fn test_summary_json_omits_other_game_fields() {
        let config = HeadlessConfig {
            game: GameKind::Paddle,
            frames: 1,
            ..Default::default()
        };
        let json = serde_json::to_string(&run(&config, &Tuning::default())).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(!json.contains("distance"));
    }
}
