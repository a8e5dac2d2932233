//! Paddle tracking controller
//!
//! Pure chase: compare the paddle center with the ball center and step
//! toward it. No trajectory prediction and no randomness; the only handicap
//! is the speed multiplier.

use super::state::{Ball, Paddle};

/// Which way a tracking paddle wants to move: -1 up, 0 hold, 1 down
pub fn tracking_direction(paddle: &Paddle, ball: &Ball, dead_zone: f32) -> f32 {
    let paddle_center = paddle.center_y();
    let ball_center = ball.center().y;
    if paddle_center < ball_center - dead_zone {
        1.0
    } else if paddle_center > ball_center + dead_zone {
        -1.0
    } else {
        0.0
    }
}

/// Move `paddle` toward the ball at `speed * difficulty`, clamped to `[0, max_y]`
pub fn track_ball(
    paddle: &mut Paddle,
    ball: &Ball,
    speed: f32,
    difficulty: f32,
    dead_zone: f32,
    max_y: f32,
) {
    let direction = tracking_direction(paddle, ball, dead_zone);
    if direction != 0.0 {
        paddle.move_by(direction * speed * difficulty, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PaddleTuning;
    use glam::Vec2;

    fn ball_at(y: f32) -> Ball {
        Ball {
            pos: Vec2::new(400.0, y - 5.0),
            vel: Vec2::ZERO,
            size: 10.0,
        }
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let tuning = PaddleTuning::default();
        let mut paddle = Paddle::new(765.0, &tuning);
        // Paddle center is 200
        for y in [190.0, 195.0, 200.0, 205.0, 210.0] {
            assert_eq!(tracking_direction(&paddle, &ball_at(y), 10.0), 0.0);
        }
        track_ball(&mut paddle, &ball_at(209.0), 8.0, 1.0, 10.0, 300.0);
        assert_eq!(paddle.pos.y, 150.0);
    }

    #[test]
    fn test_moves_toward_ball_scaled_by_difficulty() {
        let tuning = PaddleTuning::default();
        let mut paddle = Paddle::new(765.0, &tuning);
        track_ball(&mut paddle, &ball_at(300.0), 8.0, 0.3, 10.0, 300.0);
        assert!((paddle.pos.y - 152.4).abs() < 1e-4);

        let mut paddle = Paddle::new(765.0, &tuning);
        track_ball(&mut paddle, &ball_at(50.0), 8.0, 0.5, 10.0, 300.0);
        assert!((paddle.pos.y - 146.0).abs() < 1e-4);
    }

    #[test]
    fn test_tracking_clamps_to_field() {
        let tuning = PaddleTuning::default();
        let mut paddle = Paddle::new(765.0, &tuning);
        paddle.pos.y = 299.0;
        track_ball(&mut paddle, &ball_at(395.0), 8.0, 1.0, 10.0, 300.0);
        assert_eq!(paddle.pos.y, 300.0);
    }
}
