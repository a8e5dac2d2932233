//! Per-frame game loop shared by the browser shell and tests
//!
//! A [`Session`] owns the key table and one game's state. Each animation
//! frame the shell records key events, calls [`Session::frame`], writes the
//! returned HUD fields and, if the game ended, shows the summary and calls
//! [`Session::restart`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::hud::{HudUpdate, paddle_hud, runner_hud};
use crate::input::{Key, KeyState};
use crate::renderer::Vertex;
use crate::renderer::scene::{paddle_scene, runner_scene};
use crate::renderer::vertex::colors;
use crate::sim::paddle::{self, PaddleInput, PaddleState};
use crate::sim::runner::{self, RunnerInput, RunnerState};
use crate::tuning::Tuning;

/// Which game a page hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Runner,
    Paddle,
}

#[derive(Debug, Error)]
#[error("unknown game {0:?}, expected \"runner\" or \"paddle\"")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "runner" | "ballrunner" => Ok(GameKind::Runner),
            "paddle" | "pong" => Ok(GameKind::Paddle),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Runner => write!(f, "runner"),
            GameKind::Paddle => write!(f, "paddle"),
        }
    }
}

/// What the shell has to apply after a frame
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub hud: Vec<HudUpdate>,
    /// End-of-game message; set on the frame the game ends
    pub game_over: Option<String>,
}

/// How the shell shows the end-of-game message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndScreen {
    /// Reveal the page's overlay element and leave it up until restart
    Overlay,
    /// Blocking window alert
    Alert,
}

impl EndScreen {
    /// The overlay needs a paint before it is hidden again, so it is only
    /// used while the game waits for the restart button.
    pub fn choose(has_overlay: bool, waits_for_restart: bool) -> Self {
        if has_overlay && waits_for_restart {
            EndScreen::Overlay
        } else {
            EndScreen::Alert
        }
    }
}

enum Game {
    Runner(RunnerState),
    Paddle(PaddleState),
}

/// One running game plus its input table
pub struct Session {
    pub keys: KeyState,
    game: Game,
}

impl Session {
    pub fn new(kind: GameKind, seed: u64, tuning: &Tuning) -> Self {
        let game = match kind {
            GameKind::Runner => Game::Runner(RunnerState::with_tuning(seed, tuning.runner.clone())),
            GameKind::Paddle => Game::Paddle(PaddleState::with_tuning(seed, tuning.paddle.clone())),
        };
        Self {
            keys: KeyState::new(),
            game,
        }
    }

    pub fn kind(&self) -> GameKind {
        match self.game {
            Game::Runner(_) => GameKind::Runner,
            Game::Paddle(_) => GameKind::Paddle,
        }
    }

    /// Logical canvas size `(width, height)` in pixels
    pub fn canvas_size(&self) -> (f32, f32) {
        match &self.game {
            Game::Runner(s) => (s.tuning.canvas_width, s.tuning.canvas_height),
            Game::Paddle(s) => (s.tuning.canvas_width, s.tuning.canvas_height),
        }
    }

    pub fn runner(&self) -> Option<&RunnerState> {
        match &self.game {
            Game::Runner(s) => Some(s),
            Game::Paddle(_) => None,
        }
    }

    pub fn runner_mut(&mut self) -> Option<&mut RunnerState> {
        match &mut self.game {
            Game::Runner(s) => Some(s),
            Game::Paddle(_) => None,
        }
    }

    pub fn paddle(&self) -> Option<&PaddleState> {
        match &self.game {
            Game::Paddle(s) => Some(s),
            Game::Runner(_) => None,
        }
    }

    pub fn paddle_mut(&mut self) -> Option<&mut PaddleState> {
        match &mut self.game {
            Game::Paddle(s) => Some(s),
            Game::Runner(_) => None,
        }
    }

    pub fn is_over(&self) -> bool {
        match &self.game {
            Game::Runner(s) => s.is_over(),
            Game::Paddle(s) => s.is_over(),
        }
    }

    /// Run one animation frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        let keys = &self.keys;
        let output = match &mut self.game {
            Game::Runner(state) => {
                let input = RunnerInput {
                    now_ms,
                    jump: keys.was_pressed(Key::Up),
                    slide: keys.was_pressed(Key::Down),
                    special: keys.was_pressed(Key::Action),
                };
                let events = runner::tick(state, &input);
                FrameOutput {
                    hud: runner_hud(state, now_ms),
                    game_over: events.iter().find_map(|e| e.summary()),
                }
            }
            Game::Paddle(state) => {
                let input = PaddleInput {
                    up: keys.is_held(Key::Up),
                    down: keys.is_held(Key::Down),
                };
                let events = paddle::tick(state, &input);
                FrameOutput {
                    hud: paddle_hud(state),
                    game_over: events.iter().find_map(|e| e.summary()),
                }
            }
        };
        self.keys.end_frame();
        output
    }

    /// Fresh game of the same kind and tuning
    pub fn restart(&mut self, seed: u64) {
        match &mut self.game {
            Game::Runner(s) => s.restart(seed),
            Game::Paddle(s) => s.restart(seed),
        }
        self.keys.release_all();
        log::info!("Restarted {} with seed {}", self.kind(), seed);
    }

    /// HUD values for the current state without advancing it
    pub fn hud(&self, now_ms: f64) -> Vec<HudUpdate> {
        match &self.game {
            Game::Runner(s) => runner_hud(s, now_ms),
            Game::Paddle(s) => paddle_hud(s),
        }
    }

    /// Scene triangles in canvas pixels
    pub fn vertices(&self) -> Vec<Vertex> {
        match &self.game {
            Game::Runner(s) => runner_scene(s),
            Game::Paddle(s) => paddle_scene(s),
        }
    }

    pub fn clear_color(&self) -> [f32; 4] {
        match self.game {
            Game::Runner(_) => colors::runner::BACKGROUND,
            Game::Paddle(_) => colors::paddle::BACKGROUND,
        }
    }
}
