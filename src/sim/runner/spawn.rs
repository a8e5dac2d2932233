//! Time-gated entity spawning
//!
//! All four spawners read the same `last_obstacle_ms` timestamp and only the
//! obstacle spawner advances it. A ramp, wall or pad gets its turn only while
//! its gate is open and the obstacle gate has not just reset the clock; with
//! the default multipliers (2, 3, 4) the obstacle spawner always fires first,
//! so they appear only when tuned below 1.

use rand::Rng;

use super::state::{ObstacleKind, RampKind, RunnerState};

/// Milliseconds that must pass before a spawner fires
#[inline]
pub fn spawn_interval_ms(base_rate_ms: f64, multiplier: f64, game_speed: f32) -> f64 {
    base_rate_ms * multiplier / game_speed as f64
}

#[inline]
fn gate_open(last_ms: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    last_ms.is_none_or(|last| now_ms - last > interval_ms)
}

/// Run every spawner for this frame, in order: obstacle, ramp, wall, pad
pub fn spawn_entities(state: &mut RunnerState, now_ms: f64) {
    let rate = state.tuning.obstacle_spawn_rate_ms;
    let speed = state.game_speed;

    if gate_open(
        state.last_obstacle_ms,
        now_ms,
        spawn_interval_ms(rate, 1.0, speed),
    ) {
        let kind = ObstacleKind::from_roll(state.rng.random::<f32>());
        let id = state.spawn_obstacle(kind).id;
        state.last_obstacle_ms = Some(now_ms);
        log::debug!("Spawned {:?} obstacle #{}", kind, id);
    }

    if gate_open(
        state.last_obstacle_ms,
        now_ms,
        spawn_interval_ms(rate, state.tuning.ramp_spawn_multiplier, speed),
    ) {
        let kind = if state.rng.random_bool(0.5) {
            RampKind::Up
        } else {
            RampKind::Down
        };
        let id = state.spawn_ramp(kind).id;
        log::debug!("Spawned {:?} ramp #{}", kind, id);
    }

    if gate_open(
        state.last_obstacle_ms,
        now_ms,
        spawn_interval_ms(rate, state.tuning.wall_spawn_multiplier, speed),
    ) {
        let id = state.spawn_wall().id;
        log::debug!("Spawned wall #{}", id);
    }

    if gate_open(
        state.last_obstacle_ms,
        now_ms,
        spawn_interval_ms(rate, state.tuning.bounce_pad_spawn_multiplier, speed),
    ) {
        let id = state.spawn_bounce_pad().id;
        log::debug!("Spawned bounce pad #{}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_spawns_one_obstacle() {
        let mut state = RunnerState::new(3);
        spawn_entities(&mut state, 16.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_obstacle_ms, Some(16.0));
        // The obstacle just reset the shared timestamp
        assert!(state.ramps.is_empty());
        assert!(state.walls.is_empty());
        assert!(state.bounce_pads.is_empty());
    }

    #[test]
    fn test_obstacle_gate_respects_interval() {
        let mut state = RunnerState::new(3);
        spawn_entities(&mut state, 0.0);
        let interval = spawn_interval_ms(1500.0, 1.0, 1.2);
        spawn_entities(&mut state, interval);
        assert_eq!(state.obstacles.len(), 1, "gate is strict");
        spawn_entities(&mut state, interval + 1.0);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_ramp_and_wall_share_obstacle_timestamp() {
        let mut state = RunnerState::new(3);
        spawn_entities(&mut state, 0.0);
        // Ramp/wall gates are longer than the obstacle gate; since the obstacle
        // spawner always fires first and resets the clock, they stay shut.
        for frame in 1..2000 {
            spawn_entities(&mut state, frame as f64 * 16.0);
        }
        assert!(state.obstacles.len() > 10);
        assert!(state.ramps.is_empty());
        assert!(state.walls.is_empty());
    }

    #[test]
    fn test_short_ramp_multiplier_spawns_ramps() {
        let mut tuning = crate::tuning::RunnerTuning::default();
        tuning.ramp_spawn_multiplier = 0.5;
        let mut state = RunnerState::with_tuning(3, tuning);
        spawn_entities(&mut state, 0.0);
        assert!(state.ramps.is_empty());

        // Past the ramp gate but not the obstacle gate
        let ramp_gate = spawn_interval_ms(1500.0, 0.5, state.game_speed);
        spawn_entities(&mut state, ramp_gate + 1.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.ramps.len(), 1);
    }

    #[test]
    fn test_short_wall_and_pad_multipliers_spawn() {
        let mut tuning = crate::tuning::RunnerTuning::default();
        tuning.wall_spawn_multiplier = 0.5;
        tuning.bounce_pad_spawn_multiplier = 0.5;
        let mut state = RunnerState::with_tuning(3, tuning);
        spawn_entities(&mut state, 0.0);
        assert!(state.walls.is_empty());
        assert!(state.bounce_pads.is_empty());

        let gate = spawn_interval_ms(1500.0, 0.5, state.game_speed);
        spawn_entities(&mut state, gate + 1.0);
        assert_eq!(state.walls.len(), 1);
        assert_eq!(state.bounce_pads.len(), 1);
        assert!(state.ramps.is_empty());
        // Only the obstacle spawner moves the shared clock
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_obstacle_ms, Some(0.0));
    }

    #[test]
    fn test_gate_is_strict() {
        assert!(gate_open(None, 0.0, 100.0));
        assert!(gate_open(Some(0.0), 100.5, 100.0));
        assert!(!gate_open(Some(0.0), 100.0, 100.0));
    }

    #[test]
    fn test_interval_shrinks_with_speed() {
        let slow = spawn_interval_ms(1500.0, 1.0, 1.2);
        let fast = spawn_interval_ms(1500.0, 1.0, 2.4);
        assert!((slow - 1250.0).abs() < 1e-3);
        assert!(fast < slow);
    }

    #[test]
    fn test_spawns_are_reproducible() {
        let mut a = RunnerState::new(42);
        let mut b = RunnerState::new(42);
        for frame in 0..500 {
            spawn_entities(&mut a, frame as f64 * 16.0);
            spawn_entities(&mut b, frame as f64 * 16.0);
        }
        let kinds_a: Vec<_> = a.obstacles.iter().map(|o| o.kind).collect();
        let kinds_b: Vec<_> = b.obstacles.iter().map(|o| o.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
