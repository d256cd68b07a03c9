//! Fixed tick: the match state machine
//!
//! Rallying → PointScored → Rallying, until a side reaches the win score and
//! the match freezes in MatchOver.

use serde::{Deserialize, Serialize};

use super::collision::step_ball;
use super::controller::{ControlView, PaddleIntent};
use super::engine::MatchEngine;
use super::rng::RandomSource;
use super::state::{MatchEvent, MatchPhase, Side};

/// Input sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: PaddleIntent,
    pub right: PaddleIntent,
}

impl TickInput {
    pub fn from_keys(left_up: bool, left_down: bool, right_up: bool, right_down: bool) -> Self {
        Self {
            left: PaddleIntent {
                up: left_up,
                down: left_down,
            },
            right: PaddleIntent {
                up: right_up,
                down: right_down,
            },
        }
    }

    pub fn intent(&self, side: Side) -> PaddleIntent {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub events: Vec<MatchEvent>,
    /// Set only on the tick that ends the match
    pub winner: Option<Side>,
}

impl TickReport {
    pub fn scored(&self) -> Option<Side> {
        self.events.iter().find_map(|e| match e {
            MatchEvent::PointScored { side } => Some(*side),
            _ => None,
        })
    }
}

/// Advance the match by one tick
pub fn tick<R: RandomSource>(engine: &mut MatchEngine<R>, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    // Arena may have shrunk since the last tick
    let arena = engine.arena;
    engine.left.clamp(&arena);
    engine.right.clamp(&arena);

    match engine.phase {
        MatchPhase::MatchOver => return report,
        MatchPhase::PointScored => {
            engine.ticks += 1;
            move_paddles(engine, input);
            engine.phase = MatchPhase::Rallying;
            return report;
        }
        MatchPhase::Rallying => {}
    }

    engine.ticks += 1;

    let step = step_ball(
        &mut engine.ball,
        &engine.left,
        &engine.right,
        &arena,
        &engine.settings,
    );
    if step.wall_bounce {
        report.events.push(MatchEvent::WallBounce);
    }
    if let Some(side) = step.paddle_hit {
        log::debug!("{:?} paddle returned the ball", side);
        report.events.push(MatchEvent::PaddleHit { side });
    }

    move_paddles(engine, input);

    let scorer = if engine.ball.right_edge() < 0.0 {
        Some(Side::Right)
    } else if engine.ball.left_edge() > arena.width {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(side) = scorer {
        award_point(engine, side, &mut report);
    }

    report
}

/// Ask each controller for a delta and apply it, clamped
fn move_paddles<R: RandomSource>(engine: &mut MatchEngine<R>, input: &TickInput) {
    let arena = engine.arena;
    let ball = engine.ball;

    for side in Side::BOTH {
        let paddle = *engine.paddle(side);
        let controller = *engine.controller(side);
        let view = ControlView {
            ball: &ball,
            paddle: &paddle,
            arena: &arena,
            intent: input.intent(side),
        };
        let delta = controller.compute_velocity(&view, &mut engine.rng);
        engine.paddle_mut(side).apply(delta, &arena);
    }
}

fn award_point<R: RandomSource>(engine: &mut MatchEngine<R>, side: Side, report: &mut TickReport) {
    engine.score.increment(side);
    report.events.push(MatchEvent::PointScored { side });
    log::debug!(
        "{:?} scores: {} - {}",
        side,
        engine.score.left,
        engine.score.right
    );

    if let Some(winner) = engine.score.winner(engine.settings.win_score) {
        engine.phase = MatchPhase::MatchOver;
        engine.winner = Some(winner);
        report.winner = Some(winner);
        report.events.push(MatchEvent::MatchWon { winner });
        log::info!(
            "{:?} wins {} - {} after {} ticks",
            winner,
            engine.score.left,
            engine.score.right,
            engine.ticks
        );
        return;
    }

    engine.phase = MatchPhase::PointScored;
    let arena = engine.arena;
    let base_speed = engine.settings.ball_base_speed;
    engine.ball.reset(&arena, base_speed, &mut engine.rng);
}
