//! Runner collision detection and response
//!
//! Ball vs. every active entity, one response per entity variant:
//!
//! | entity          | test              | response                          |
//! |-----------------|-------------------|-----------------------------------|
//! | ramp (up)       | box overlap       | upward boost, jump state restored |
//! | ramp (down)     | box overlap       | nothing                           |
//! | wall            | box overlap       | wall-slide, velocity zeroed       |
//! | bounce pad      | box overlap       | upward bounce                     |
//! | obstacle        | x overlap, bottom below top | kind-specific lethality |

use super::state::{Ball, Obstacle, ObstacleKind, RampKind, RunnerState, Scrolling};
use crate::sim::Aabb;

/// Whether touching `obstacle` kills the ball this frame
///
/// Only called once the ball overlaps the obstacle horizontally and its
/// bottom edge is below the obstacle's top.
pub fn is_lethal(obstacle: &Obstacle, ball: &Ball) -> bool {
    match obstacle.kind {
        ObstacleKind::Jump => {
            // Safe only when airborne and last frame's bottom was already clear
            let previous_bottom = ball.bounds().bottom() - ball.vel.y;
            !ball.is_jumping || previous_bottom > obstacle.pos.y
        }
        ObstacleKind::Slide => !ball.is_sliding,
        ObstacleKind::Breakable => !obstacle.is_broken,
        ObstacleKind::Moving => true,
    }
}

/// Obstacle contact test: horizontal overlap with the ball's bottom below the top
#[inline]
fn touches_obstacle(ball_box: &Aabb, obstacle: &Obstacle) -> bool {
    let ob = obstacle.bounds();
    ball_box.overlaps_x(&ob) && ball_box.bottom() > ob.top()
}

/// Apply every non-lethal response, then look for a lethal hit.
///
/// Returns the kind of the first obstacle that killed the ball.
pub fn check_collisions(state: &mut RunnerState) -> Option<ObstacleKind> {
    let tuning = &state.tuning;
    let ball = &mut state.ball;

    // Ramps
    for ramp in &state.ramps {
        if ball.bounds().overlaps(&ramp.bounds()) && ramp.kind == RampKind::Up {
            ball.vel.y = tuning.ramp_boost;
            ball.is_jumping = true;
            ball.can_double_jump = true;
        }
    }

    // Walls: wall-slide holds only while touching
    ball.is_wall_sliding = false;
    for wall in &state.walls {
        if ball.bounds().overlaps(&wall.bounds()) {
            ball.is_wall_sliding = true;
            ball.wall_jump_direction = if ball.pos.x < wall.pos.x { 1.0 } else { -1.0 };
            ball.vel = glam::Vec2::ZERO;
        }
    }

    // Bounce pads
    for pad in &state.bounce_pads {
        if ball.bounds().overlaps(&pad.bounds()) {
            ball.vel.y = tuning.bounce_pad_force;
            ball.is_jumping = true;
        }
    }

    // Obstacles
    let ball_box = ball.bounds();
    state
        .obstacles
        .iter()
        .find(|o| touches_obstacle(&ball_box, o) && is_lethal(o, ball))
        .map(|o| o.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// State with one obstacle placed under the ball
    fn state_with(kind: ObstacleKind) -> RunnerState {
        let mut state = RunnerState::new(7);
        let x = state.ball.pos.x - 10.0;
        state.spawn_obstacle(kind).pos.x = x;
        state
    }

    #[test]
    fn test_grounded_ball_hits_jump_obstacle() {
        let mut state = state_with(ObstacleKind::Jump);
        assert_eq!(check_collisions(&mut state), Some(ObstacleKind::Jump));
    }

    #[test]
    fn test_ball_clear_above_jump_obstacle_is_safe() {
        let mut state = state_with(ObstacleKind::Jump);
        // Bottom edge exactly at the obstacle top: no vertical overlap
        let top = state.obstacles[0].pos.y;
        state.ball.pos.y = top - state.ball.radius;
        state.ball.is_jumping = true;
        state.ball.vel.y = -12.0;
        assert_eq!(check_collisions(&mut state), None);
    }

    #[test]
    fn test_descending_onto_jump_obstacle_top_is_safe() {
        let mut state = state_with(ObstacleKind::Jump);
        let top = state.obstacles[0].pos.y;
        // Bottom dipped 3px below the top this frame, was 1px above last frame
        state.ball.pos.y = top + 3.0 - state.ball.radius;
        state.ball.is_jumping = true;
        state.ball.vel.y = 4.0;
        assert_eq!(check_collisions(&mut state), None);
    }

    #[test]
    fn test_airborne_ball_entering_jump_obstacle_side_dies() {
        let mut state = state_with(ObstacleKind::Jump);
        let top = state.obstacles[0].pos.y;
        // Well below the top and was already below it last frame
        state.ball.pos.y = top + 20.0 - state.ball.radius;
        state.ball.is_jumping = true;
        state.ball.vel.y = 2.0;
        assert_eq!(check_collisions(&mut state), Some(ObstacleKind::Jump));
    }

    #[test]
    fn test_slide_obstacle_needs_sliding() {
        let mut state = state_with(ObstacleKind::Slide);
        assert_eq!(check_collisions(&mut state), Some(ObstacleKind::Slide));

        let mut state = state_with(ObstacleKind::Slide);
        state.ball.is_sliding = true;
        assert_eq!(check_collisions(&mut state), None);
    }

    #[test]
    fn test_breakable_obstacle_safe_once_broken() {
        let mut state = state_with(ObstacleKind::Breakable);
        assert_eq!(check_collisions(&mut state), Some(ObstacleKind::Breakable));

        let mut state = state_with(ObstacleKind::Breakable);
        state.obstacles[0].is_broken = true;
        assert_eq!(check_collisions(&mut state), None);
    }

    #[test]
    fn test_moving_obstacle_always_lethal() {
        let mut state = state_with(ObstacleKind::Moving);
        state.ball.is_sliding = true;
        state.ball.is_jumping = true;
        assert_eq!(check_collisions(&mut state), Some(ObstacleKind::Moving));
    }

    #[test]
    fn test_obstacle_ahead_is_harmless() {
        let mut state = RunnerState::new(7);
        state.spawn_obstacle(ObstacleKind::Moving);
        assert_eq!(check_collisions(&mut state), None);
    }

    #[test]
    fn test_up_ramp_boosts() {
        let mut state = RunnerState::new(7);
        let x = state.ball.pos.x;
        state.spawn_ramp(RampKind::Up).pos.x = x;
        assert_eq!(check_collisions(&mut state), None);
        assert_eq!(state.ball.vel.y, -18.0);
        assert!(state.ball.is_jumping);
        assert!(state.ball.can_double_jump);
    }

    #[test]
    fn test_down_ramp_does_nothing() {
        let mut state = RunnerState::new(7);
        let x = state.ball.pos.x;
        state.spawn_ramp(RampKind::Down).pos.x = x;
        let before = state.ball.clone();
        assert_eq!(check_collisions(&mut state), None);
        assert_eq!(state.ball.vel, before.vel);
        assert_eq!(state.ball.is_jumping, before.is_jumping);
    }

    #[test]
    fn test_wall_contact_sets_slide_and_direction() {
        let mut state = RunnerState::new(7);
        state.ball.vel = Vec2::new(5.0, -3.0);
        let x = state.ball.pos.x + 5.0;
        state.spawn_wall().pos.x = x;
        check_collisions(&mut state);
        assert!(state.ball.is_wall_sliding);
        assert_eq!(state.ball.wall_jump_direction, 1.0);
        assert_eq!(state.ball.vel, Vec2::ZERO);

        // Wall gone: wall-slide clears on the next check
        state.walls.clear();
        check_collisions(&mut state);
        assert!(!state.ball.is_wall_sliding);
    }

    #[test]
    fn test_wall_on_left_of_ball_flips_direction() {
        let mut state = RunnerState::new(7);
        let x = state.ball.pos.x - 15.0;
        state.spawn_wall().pos.x = x;
        check_collisions(&mut state);
        assert_eq!(state.ball.wall_jump_direction, -1.0);
    }

    #[test]
    fn test_bounce_pad_launches() {
        let mut state = RunnerState::new(7);
        let x = state.ball.pos.x - 10.0;
        state.spawn_bounce_pad().pos.x = x;
        check_collisions(&mut state);
        assert_eq!(state.ball.vel.y, -15.0);
        assert!(state.ball.is_jumping);
    }
}
