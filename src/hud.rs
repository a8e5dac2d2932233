//! HUD field values derived from game state
//!
//! The browser shell writes these into DOM elements by id. Keeping the
//! formatting here lets the text be tested without a DOM.

use crate::sim::paddle::PaddleState;
use crate::sim::runner::{RunnerState, special_status};

/// Element ids the games write to
pub mod ids {
    pub const DISTANCE: &str = "distance";
    pub const LEVEL: &str = "level";
    pub const SPECIAL_ATTACK: &str = "specialAttack";
    pub const SCORE: &str = "score";
    pub const PROGRESS_BAR: &str = "progressBar";
}

/// One DOM write
#[derive(Debug, Clone, PartialEq)]
pub enum HudUpdate {
    /// Replace an element's text content
    Text { id: &'static str, text: String },
    /// Set an element's CSS width as a percentage
    Width { id: &'static str, percent: f32 },
}

impl HudUpdate {
    fn text(id: &'static str, text: impl Into<String>) -> Self {
        HudUpdate::Text {
            id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            HudUpdate::Text { id, .. } | HudUpdate::Width { id, .. } => id,
        }
    }
}

/// Distance, level and special-attack status
pub fn runner_hud(state: &RunnerState, now_ms: f64) -> Vec<HudUpdate> {
    vec![
        HudUpdate::text(ids::DISTANCE, (state.distance.floor() as u32).to_string()),
        HudUpdate::text(ids::LEVEL, state.level.to_string()),
        HudUpdate::text(ids::SPECIAL_ATTACK, special_status(state, now_ms).text()),
    ]
}

/// Level, score and level progress bar
pub fn paddle_hud(state: &PaddleState) -> Vec<HudUpdate> {
    vec![
        HudUpdate::text(ids::LEVEL, state.level.to_string()),
        HudUpdate::text(ids::SCORE, state.score.to_string()),
        HudUpdate::Width {
            id: ids::PROGRESS_BAR,
            percent: state.progress_percent(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of<'a>(updates: &'a [HudUpdate], id: &str) -> Option<&'a str> {
        updates.iter().find_map(|u| match u {
            HudUpdate::Text { id: i, text } if *i == id => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_fresh_runner_hud() {
        let state = RunnerState::new(1);
        let hud = runner_hud(&state, 0.0);
        assert_eq!(text_of(&hud, ids::DISTANCE), Some("0"));
        assert_eq!(text_of(&hud, ids::LEVEL), Some("1"));
        assert_eq!(
            text_of(&hud, ids::SPECIAL_ATTACK),
            Some("Special Attack: Not Ready")
        );
    }

    #[test]
    fn test_runner_distance_is_floored() {
        let mut state = RunnerState::new(1);
        state.distance = 1234.9;
        state.level = 2;
        let hud = runner_hud(&state, 0.0);
        assert_eq!(text_of(&hud, ids::DISTANCE), Some("1234"));
        assert_eq!(text_of(&hud, ids::LEVEL), Some("2"));
    }

    #[test]
    fn test_paddle_hud() {
        let mut state = PaddleState::new(1);
        state.level = 10;
        state.score = 7;
        let hud = paddle_hud(&state);
        assert_eq!(text_of(&hud, ids::LEVEL), Some("10"));
        assert_eq!(text_of(&hud, ids::SCORE), Some("7"));
        assert!(hud.contains(&HudUpdate::Width {
            id: ids::PROGRESS_BAR,
            percent: 100.0
        }));
    }
}
