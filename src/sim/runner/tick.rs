//! Per-frame runner update
//!
//! Order within a frame: player actions, ball physics, slide timeout,
//! entity scroll/cull, spawning, distance/level, special-attack re-arm,
//! collisions.

use super::collision::check_collisions;
use super::spawn::spawn_entities;
use super::special::{rearm_on_distance, try_special_attack};
use super::state::{GamePhase, RunnerEvent, RunnerState, Scrolling};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerInput {
    /// Frame timestamp in milliseconds (monotonic)
    pub now_ms: f64,
    /// Jump key pressed this frame
    pub jump: bool,
    /// Slide key pressed this frame
    pub slide: bool,
    /// Special attack key pressed this frame
    pub special: bool,
}

impl RunnerInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Default::default()
        }
    }
}

/// Advance the run by one frame
pub fn tick(state: &mut RunnerState, input: &RunnerInput) -> Vec<RunnerEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }
    let now = input.now_ms;
    state.frames += 1;

    if input.jump {
        jump(state);
    }
    if input.slide {
        start_slide(state, now);
    }
    if input.special {
        if let Some(broken) = try_special_attack(state, now) {
            log::info!("Special attack broke {} obstacles", broken);
            events.push(RunnerEvent::SpecialAttackUsed { broken });
        }
    }

    integrate_ball(state);

    if state.ball.is_sliding && now - state.ball.slide_start_ms > state.tuning.slide_duration_ms {
        state.ball.is_sliding = false;
    }

    let dx = state.tuning.obstacle_speed * state.game_speed;
    scroll_and_cull(&mut state.obstacles, dx);
    scroll_and_cull(&mut state.ramps, dx);
    scroll_and_cull(&mut state.walls, dx);
    scroll_and_cull(&mut state.bounce_pads, dx);

    spawn_entities(state, now);

    let previous_distance = state.distance;
    state.distance += state.game_speed;
    let new_level = state.tuning.level_for_distance(state.distance);
    if new_level > state.level {
        state.level = new_level;
        state.game_speed = state.tuning.game_speed_for_level(new_level);
        log::info!("Runner level {} (speed {:.1})", new_level, state.game_speed);
        events.push(RunnerEvent::LevelUp { level: new_level });
    }

    if rearm_on_distance(state, previous_distance) {
        log::info!("Special attack ready at {:.0}m", state.distance);
        events.push(RunnerEvent::SpecialAttackArmed);
    }

    if let Some(cause) = check_collisions(state) {
        state.phase = GamePhase::GameOver;
        let distance = state.distance.floor() as u32;
        log::info!(
            "Runner crashed into {:?} obstacle at {}m, level {}",
            cause,
            distance,
            state.level
        );
        events.push(RunnerEvent::GameOver {
            distance,
            level: state.level,
            cause,
        });
    }

    events
}

/// Jump, double jump, or wall jump, whichever the ball is eligible for
pub fn jump(state: &mut RunnerState) {
    let tuning = &state.tuning;
    let ball = &mut state.ball;
    if ball.is_sliding {
        return;
    }
    if !ball.is_jumping {
        ball.is_jumping = true;
        ball.can_double_jump = true;
        ball.vel.y = tuning.jump_force;
    } else if ball.can_double_jump {
        ball.can_double_jump = false;
        ball.vel.y = tuning.double_jump_force;
    } else if ball.is_wall_sliding {
        ball.is_wall_sliding = false;
        ball.vel.y = tuning.wall_jump_force;
        ball.vel.x = ball.wall_jump_direction * tuning.wall_jump_push;
    }
}

/// Begin a slide; only from the ground and not mid-slide
pub fn start_slide(state: &mut RunnerState, now_ms: f64) {
    let ball = &mut state.ball;
    if !ball.is_jumping && !ball.is_sliding {
        ball.is_sliding = true;
        ball.slide_start_ms = now_ms;
    }
}

/// Gravity integration while airborne; landing clears the jump state
pub fn integrate_ball(state: &mut RunnerState) {
    let ground = state.tuning.ground_y();
    let ball = &mut state.ball;
    if !ball.is_jumping {
        return;
    }
    ball.vel.y += state.tuning.gravity;
    ball.pos += ball.vel;

    if ball.pos.y > ground {
        ball.pos.y = ground;
        ball.is_jumping = false;
        ball.can_double_jump = false;
        ball.vel = glam::Vec2::ZERO;
    }
}

/// Move entities left and drop the ones fully past the left edge
pub fn scroll_and_cull<T: Scrolling>(entities: &mut Vec<T>, dx: f32) {
    for entity in entities.iter_mut() {
        entity.scroll(dx);
    }
    entities.retain(|e| !e.is_off_screen());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::runner::state::ObstacleKind;

    #[test]
    fn test_jump_then_land() {
        let mut state = RunnerState::new(1);
        jump(&mut state);
        assert!(state.ball.is_jumping);
        assert_eq!(state.ball.vel.y, -12.0);

        let ground = state.tuning.ground_y();
        let mut frames = 0;
        while state.ball.is_jumping {
            integrate_ball(&mut state);
            assert!(state.ball.pos.y <= ground);
            frames += 1;
            assert!(frames < 200, "ball never landed");
        }
        assert_eq!(state.ball.pos.y, ground);
        assert!(!state.ball.can_double_jump);
        assert_eq!(state.ball.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn test_single_double_jump_per_flight() {
        let mut state = RunnerState::new(1);
        jump(&mut state);
        integrate_ball(&mut state);
        jump(&mut state);
        assert_eq!(state.ball.vel.y, -10.0);
        assert!(!state.ball.can_double_jump);

        // Third press has no charge left
        integrate_ball(&mut state);
        let vy = state.ball.vel.y;
        jump(&mut state);
        assert_eq!(state.ball.vel.y, vy);
    }

    #[test]
    fn test_wall_jump_after_double_jump() {
        let mut state = RunnerState::new(1);
        jump(&mut state);
        jump(&mut state);
        state.ball.is_wall_sliding = true;
        state.ball.wall_jump_direction = -1.0;
        jump(&mut state);
        assert_eq!(state.ball.vel.y, -10.0);
        assert_eq!(state.ball.vel.x, -5.0);
        assert!(!state.ball.is_wall_sliding);
    }

    #[test]
    fn test_no_jump_while_sliding() {
        let mut state = RunnerState::new(1);
        start_slide(&mut state, 0.0);
        jump(&mut state);
        assert!(!state.ball.is_jumping);
    }

    #[test]
    fn test_no_slide_in_air() {
        let mut state = RunnerState::new(1);
        jump(&mut state);
        start_slide(&mut state, 0.0);
        assert!(!state.ball.is_sliding);
    }

    #[test]
    fn test_slide_expires() {
        let mut state = RunnerState::new(1);
        let input = RunnerInput {
            now_ms: 100.0,
            slide: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.ball.is_sliding);
        state.obstacles.clear();

        tick(&mut state, &RunnerInput::at(900.0));
        assert!(state.ball.is_sliding, "800ms have not passed yet");
        state.obstacles.clear();

        tick(&mut state, &RunnerInput::at(901.0));
        assert!(!state.ball.is_sliding);
    }

    #[test]
    fn test_cull_when_right_edge_passes_zero() {
        let mut state = RunnerState::new(1);
        state.spawn_obstacle(ObstacleKind::Jump).pos.x = -29.0;
        scroll_and_cull(&mut state.obstacles, 0.5);
        assert_eq!(state.obstacles.len(), 1, "right edge at 0.5 is still visible");
        scroll_and_cull(&mut state.obstacles, 0.5);
        assert_eq!(state.obstacles.len(), 1, "right edge exactly at 0 is kept");
        scroll_and_cull(&mut state.obstacles, 0.5);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_cull_removes_every_expired_entity() {
        let mut state = RunnerState::new(1);
        for _ in 0..3 {
            state.spawn_obstacle(ObstacleKind::Slide).pos.x = -100.0;
        }
        state.spawn_obstacle(ObstacleKind::Slide);
        scroll_and_cull(&mut state.obstacles, 1.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_distance_and_level() {
        let mut state = RunnerState::new(1);
        state.distance = 999.0;
        tick(&mut state, &RunnerInput::at(0.0));
        state.obstacles.clear();
        assert_eq!(state.level, 2);
        assert!((state.game_speed - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = RunnerState::new(1);
        let x = state.ball.pos.x - 10.0;
        state.spawn_obstacle(ObstacleKind::Moving).pos.x = x + 7.0 * 1.2;
        state.last_obstacle_ms = Some(0.0);

        let events = tick(&mut state, &RunnerInput::at(16.0));
        assert!(state.is_over());
        let summary = events.iter().find_map(|e| e.summary());
        assert!(summary.unwrap().starts_with("Game Over! You ran 1 meters"));

        let distance = state.distance;
        assert!(tick(&mut state, &RunnerInput::at(32.0)).is_empty());
        assert_eq!(state.distance, distance);
    }
}
