//! Per-frame paddle game update
//!
//! Order within a frame: player paddle, AI paddle, ball motion, wall
//! reflection, paddle hits, scoring.

use super::ai::track_ball;
use super::state::{GamePhase, Paddle, PaddleEvent, PaddleState};
use crate::sim::Aabb;

/// Held keys for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Advance the match by one frame
pub fn tick(state: &mut PaddleState, input: &PaddleInput) -> Vec<PaddleEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }
    state.frames += 1;
    let max_y = state.tuning.max_paddle_y();

    let speed = state.tuning.paddle_speed;
    if input.up {
        state.player.move_by(-speed, max_y);
    }
    if input.down {
        state.player.move_by(speed, max_y);
    }

    let difficulty = state.tuning.ai_difficulty(state.level);
    track_ball(
        &mut state.ai,
        &state.ball,
        speed,
        difficulty,
        state.tuning.ai_dead_zone,
        max_y,
    );

    state.ball.pos += state.ball.vel;
    reflect_off_walls(state);

    if state.ball.vel.x < 0.0 {
        if hits_player(&state.ball.bounds(), &state.player) {
            let kick = deflection(state, &state.player);
            state.ball.vel.x = -state.ball.vel.x + state.tuning.paddle_hit_speedup;
            state.ball.vel.y += kick;
            state.score += 1;
            events.push(PaddleEvent::PlayerHit { score: state.score });
        }
    } else if hits_ai(&state.ball.bounds(), &state.ai) {
        let kick = deflection(state, &state.ai);
        state.ball.vel.x = -state.ball.vel.x - state.tuning.paddle_hit_speedup;
        state.ball.vel.y += kick;
        events.push(PaddleEvent::AiHit);
    }

    let ball = state.ball.bounds();
    if ball.left() <= 0.0 {
        state.phase = GamePhase::GameOver;
        log::info!("Paddle game over at level {} with score {}", state.level, state.score);
        events.push(PaddleEvent::GameOver { score: state.score });
    } else if ball.right() >= state.tuning.canvas_width {
        if state.level >= state.tuning.max_level {
            state.phase = GamePhase::Won;
            log::info!("All {} levels cleared with score {}", state.level, state.score);
            events.push(PaddleEvent::Victory { score: state.score });
        } else {
            state.level += 1;
            state.reset_ball();
            log::info!(
                "Paddle level {} (ball speed {:.1})",
                state.level,
                state.ball.axis_speed()
            );
            events.push(PaddleEvent::LevelUp { level: state.level });
        }
    }

    events
}

/// Bounce off the top and bottom edges, always back into the field
fn reflect_off_walls(state: &mut PaddleState) {
    let ball = state.ball.bounds();
    if ball.top() <= 0.0 {
        state.ball.vel.y = state.ball.vel.y.abs();
    } else if ball.bottom() >= state.tuning.canvas_height {
        state.ball.vel.y = -state.ball.vel.y.abs();
    }
}

/// Vertical kick from where the ball met the paddle
fn deflection(state: &PaddleState, paddle: &Paddle) -> f32 {
    (state.ball.pos.y - paddle.center_y()) * state.tuning.deflection_factor
}

/// Ball is at or left of the player paddle's face and vertically in reach
fn hits_player(ball: &Aabb, paddle: &Paddle) -> bool {
    let p = paddle.bounds();
    ball.left() <= p.right() && ball.bottom() >= p.top() && ball.top() <= p.bottom()
}

/// Ball is at or right of the AI paddle's face and vertically in reach
fn hits_ai(ball: &Aabb, paddle: &Paddle) -> bool {
    let p = paddle.bounds();
    ball.right() >= p.left() && ball.bottom() >= p.top() && ball.top() <= p.bottom()
}
