//! Per-game scene builders
//!
//! Turn simulation state into a triangle list in canvas pixels. Draw order
//! is back to front.

use glam::Vec2;

use super::shapes::{circle, dashed_line, rect, rotated_rect};
use super::vertex::{Vertex, colors};
use crate::sim::paddle::PaddleState;
use crate::sim::runner::{ObstacleKind, RunnerState};

const BALL_SEGMENTS: u32 = 32;

/// Broken obstacles are not drawn
pub fn runner_scene(state: &RunnerState) -> Vec<Vertex> {
    use colors::runner as c;

    let mut vertices = Vec::new();
    for pad in &state.bounce_pads {
        vertices.extend(rect(pad.pos, pad.size, c::BOUNCE_PAD));
    }
    for wall in &state.walls {
        vertices.extend(rect(wall.pos, wall.size, c::WALL));
    }
    for ramp in &state.ramps {
        vertices.extend(rotated_rect(ramp.pos, ramp.size, ramp.angle, c::RAMP));
    }
    for obstacle in state.obstacles.iter().filter(|o| !o.is_broken) {
        let color = match obstacle.kind {
            ObstacleKind::Breakable => c::BREAKABLE,
            ObstacleKind::Moving => c::MOVING,
            ObstacleKind::Jump | ObstacleKind::Slide => c::OBSTACLE,
        };
        vertices.extend(rect(obstacle.pos, obstacle.size, color));
    }
    vertices.extend(circle(
        state.ball.pos,
        state.ball.radius,
        c::BALL,
        BALL_SEGMENTS,
    ));
    vertices
}

/// Paddles, round ball and the dashed center line
pub fn paddle_scene(state: &PaddleState) -> Vec<Vertex> {
    use colors::paddle as c;

    let w = state.tuning.canvas_width;
    let h = state.tuning.canvas_height;
    let mut vertices = dashed_line(
        Vec2::new(w / 2.0, 0.0),
        Vec2::new(w / 2.0, h),
        10.0,
        10.0,
        1.0,
        c::FOREGROUND,
    );
    vertices.extend(rect(state.player.pos, state.player.size, c::FOREGROUND));
    vertices.extend(rect(state.ai.pos, state.ai.size, c::FOREGROUND));
    vertices.extend(circle(
        state.ball.center(),
        state.ball.size / 2.0,
        c::FOREGROUND,
        BALL_SEGMENTS,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_runner_scene_is_just_the_ball() {
        let state = RunnerState::new(1);
        assert_eq!(runner_scene(&state).len(), BALL_SEGMENTS as usize * 3);
    }

    #[test]
    fn test_broken_obstacles_are_hidden() {
        let mut state = RunnerState::new(1);
        state.spawn_obstacle(ObstacleKind::Breakable);
        state.spawn_obstacle(ObstacleKind::Breakable).is_broken = true;
        let ball_only = BALL_SEGMENTS as usize * 3;
        assert_eq!(runner_scene(&state).len(), ball_only + 6);
    }

    #[test]
    fn test_breakable_uses_its_color() {
        let mut state = RunnerState::new(1);
        state.spawn_obstacle(ObstacleKind::Breakable);
        let vertices = runner_scene(&state);
        assert!(vertices[..6].iter().all(|v| v.color == colors::runner::BREAKABLE));
    }

    #[test]
    fn test_paddle_scene_contents() {
        let state = PaddleState::new(1);
        let vertices = paddle_scene(&state);
        // 20 dashes, two paddles, ball
        let expected = 20 * 6 + 2 * 6 + BALL_SEGMENTS as usize * 3;
        assert_eq!(vertices.len(), expected);
        assert!(vertices.iter().all(|v| v.color == colors::paddle::FOREGROUND));
    }
}
