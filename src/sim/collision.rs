//! Ball physics: integration, wall reflection and paddle hits
//!
//! Resolution is velocity-only. A ball that overshoots a wall is not pushed
//! back; it simply turns around on the tick its next position would leave the
//! field.

use super::state::{Arena, Ball, Paddle, Side};
use crate::settings::MatchSettings;

/// Where and how a ball met a paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    pub side: Side,
    /// 0 = top edge, 1 = bottom edge
    pub hit_position: f32,
}

/// What happened to the ball during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
}

/// Launch angle for a normalised hit position.
/// Top hits go up (negative), centre hits go straight.
#[inline]
pub fn hit_angle(hit_position: f32, angle_span: f32) -> f32 {
    (hit_position - 0.5) * angle_span
}

/// Advance the ball by one tick of its velocity
#[inline]
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Flip `dy` if the next vertical position leaves `[r, H - r]`
pub fn reflect_walls(ball: &mut Ball, arena: &Arena) -> bool {
    let next_y = ball.pos.y + ball.vel.y;
    if next_y > arena.height - ball.radius || next_y < ball.radius {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Geometric contact test against one paddle.
///
/// Only balls travelling toward the paddle can hit it, so a ball still
/// overlapping the face on the tick after a bounce is not hit again.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, arena: &Arena) -> Option<PaddleContact> {
    let front = paddle.front_x(arena);
    let crossed = match paddle.side {
        Side::Left => ball.left_edge() < front,
        Side::Right => ball.right_edge() > front,
    };
    let within = ball.pos.y > paddle.y && ball.pos.y < paddle.y + paddle.height;
    let approaching = ball.vel.x * paddle.side.incoming_sign() > 0.0;

    if crossed && within && approaching {
        let hit_position = ((ball.pos.y - paddle.y) / paddle.height).clamp(0.0, 1.0);
        Some(PaddleContact {
            side: paddle.side,
            hit_position,
        })
    } else {
        None
    }
}

/// Rebound off a paddle: reverse and amplify `dx`, re-derive `dy` from the
/// hit geometry, plus the optional boost along the paddle's travel.
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    contact: PaddleContact,
    paddle_vel: f32,
    settings: &MatchSettings,
) {
    let angle = hit_angle(contact.hit_position, settings.hit_angle_span);
    let boost = if paddle_vel != 0.0 {
        settings.hit_boost * paddle_vel.signum()
    } else {
        0.0
    };

    ball.vel.x = -ball.vel.x * settings.hit_speedup;
    ball.vel.y = settings.ball_base_speed * angle.sin() * settings.hit_speedup + boost;
}

/// Run one physics step: integrate, walls, then at most one paddle
pub fn step_ball(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    arena: &Arena,
    settings: &MatchSettings,
) -> StepReport {
    let mut report = StepReport::default();

    integrate(ball);
    report.wall_bounce = reflect_walls(ball, arena);

    for paddle in [left, right] {
        if let Some(contact) = paddle_contact(ball, paddle, arena) {
            resolve_paddle_hit(ball, contact, paddle.vel, settings);
            log::trace!(
                "{:?} paddle hit at {:.2}, vel now ({:.2}, {:.2})",
                contact.side,
                contact.hit_position,
                ball.vel.x,
                ball.vel.y
            );
            report.paddle_hit = Some(contact.side);
            break;
        }
    }

    report
}
