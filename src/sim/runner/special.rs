//! Special attack: clears breakable obstacles, gated by a cooldown

use super::state::RunnerState;

/// What the special-attack indicator should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialStatus {
    Ready,
    /// Whole seconds until the cooldown ends (rounded up)
    CoolingDown(u32),
    NotReady,
}

impl SpecialStatus {
    pub fn text(&self) -> String {
        match self {
            SpecialStatus::Ready => "Special Attack Ready! (Press Space)".to_string(),
            SpecialStatus::CoolingDown(secs) => format!("Ready in: {secs}s"),
            SpecialStatus::NotReady => "Special Attack: Not Ready".to_string(),
        }
    }
}

/// Milliseconds left on the cooldown (0 when none is running)
pub fn cooldown_remaining_ms(state: &RunnerState, now_ms: f64) -> f64 {
    state
        .last_special_attack_ms
        .map(|last| (state.tuning.special_attack_cooldown_ms - (now_ms - last)).max(0.0))
        .unwrap_or(0.0)
}

pub fn special_status(state: &RunnerState, now_ms: f64) -> SpecialStatus {
    if state.ball.has_special_attack {
        return SpecialStatus::Ready;
    }
    let secs = (cooldown_remaining_ms(state, now_ms) / 1000.0).ceil() as u32;
    if secs > 0 {
        SpecialStatus::CoolingDown(secs)
    } else {
        SpecialStatus::NotReady
    }
}

/// Fire the special attack if armed and off cooldown.
///
/// Returns how many obstacles broke, or `None` if the attack did not fire.
pub fn try_special_attack(state: &mut RunnerState, now_ms: f64) -> Option<usize> {
    if !state.ball.has_special_attack {
        return None;
    }
    let cooled = state
        .last_special_attack_ms
        .is_none_or(|last| now_ms - last > state.tuning.special_attack_cooldown_ms);
    if !cooled {
        return None;
    }

    let mut broken = 0;
    for obstacle in state.obstacles.iter_mut() {
        if obstacle.is_breakable() && !obstacle.is_broken {
            obstacle.is_broken = true;
            broken += 1;
        }
    }
    state.ball.has_special_attack = false;
    state.last_special_attack_ms = Some(now_ms);
    Some(broken)
}

/// Arm the attack when `floor(distance)` crosses a multiple of the threshold.
///
/// Returns true if this step armed it.
pub fn rearm_on_distance(state: &mut RunnerState, previous_distance: f32) -> bool {
    let step = state.tuning.special_attack_distance;
    let before = (previous_distance.floor() / step).floor();
    let after = (state.distance.floor() / step).floor();
    if after > before && !state.ball.has_special_attack {
        state.ball.has_special_attack = true;
        return true;
    }
    false
}
