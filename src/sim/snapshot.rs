//! Read-only frame data for a rendering shell

use serde::{Deserialize, Serialize};

use super::engine::MatchEngine;
use super::rng::RandomSource;
use super::state::{Arena, MatchPhase, Paddle, Side};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Paddle rectangle; `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PaddleView {
    fn of(paddle: &Paddle, arena: &Arena) -> Self {
        Self {
            x: paddle.x(arena),
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub arena: Arena,
    pub ball: BallView,
    pub left_paddle: PaddleView,
    pub right_paddle: PaddleView,
    pub left_score: u32,
    pub right_score: u32,
    pub left_label: String,
    pub right_label: String,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
}

impl RenderSnapshot {
    pub fn capture<R: RandomSource>(engine: &MatchEngine<R>) -> Self {
        let arena = engine.arena();
        let ball = engine.ball();
        let score = engine.score();
        let (left_label, right_label) = side_labels(engine);

        Self {
            arena,
            ball: BallView {
                x: ball.pos.x,
                y: ball.pos.y,
                radius: ball.radius,
            },
            left_paddle: PaddleView::of(engine.paddle(Side::Left), &arena),
            right_paddle: PaddleView::of(engine.paddle(Side::Right), &arena),
            left_score: score.left,
            right_score: score.right,
            left_label,
            right_label,
            phase: engine.phase(),
            winner: engine.winner(),
        }
    }

    /// Caption for one side's score
    pub fn label(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_label,
            Side::Right => &self.right_label,
        }
    }
}

/// "AI" / "Player", numbered when both sides share a kind
fn side_labels<R: RandomSource>(engine: &MatchEngine<R>) -> (String, String) {
    let config = engine.config();
    if config.left == config.right {
        let base = config.left.label();
        (format!("{base} 1"), format!("{base} 2"))
    } else {
        (config.left.label().to_string(), config.right.label().to_string())
    }
}
