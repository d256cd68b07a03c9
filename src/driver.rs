//! Fixed-timestep driver
//!
//! Turns variable wall-clock frames into whole simulation ticks and delivers
//! the delayed win announcement.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::EngineError;
use crate::settings::{MatchConfig, MatchSettings};
use crate::sim::{
    CommandOutcome, IgnoreReason, MatchEngine, MatchEvent, RandomSource, RenderSnapshot,
    SeededRng, Side, TickInput,
};

/// Result of one display frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub snapshot: RenderSnapshot,
    pub ticks_run: u32,
    /// Events from every tick run this frame, in order
    pub events: Vec<MatchEvent>,
    /// Winner, delivered exactly once after the announcement delay
    pub announcement: Option<Side>,
}

/// Runs a match at a fixed tick rate regardless of frame timing
#[derive(Debug, Clone)]
pub struct Driver<R: RandomSource = SeededRng> {
    engine: MatchEngine<R>,
    accumulator: f32,
    /// Seconds left before the winner is announced
    announce_in: Option<f32>,
}

impl Driver<SeededRng> {
    pub fn start(
        config: MatchConfig,
        settings: MatchSettings,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Ok(Self::new(MatchEngine::start(config, settings, seed)?))
    }
}

impl<R: RandomSource> Driver<R> {
    pub fn new(engine: MatchEngine<R>) -> Self {
        Self {
            engine,
            accumulator: 0.0,
            announce_in: None,
        }
    }

    /// Advance by `dt` seconds of wall-clock time
    pub fn frame(&mut self, dt: f32, input: &TickInput) -> FrameOutput {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let mut events = Vec::new();
        let mut substeps = 0;
        let mut won_this_frame = false;

        if !self.engine.is_over() {
            self.accumulator += dt;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let report = self.engine.tick(input);
                self.accumulator -= SIM_DT;
                substeps += 1;
                events.extend(report.events);

                if report.winner.is_some() {
                    self.announce_in = Some(self.engine.settings().win_announce_delay);
                    self.accumulator = 0.0;
                    won_this_frame = true;
                    break;
                }
            }
            // Drop backlog the substep cap could not absorb
            if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
                log::trace!("Dropping {:.4}s of simulation backlog", self.accumulator);
                self.accumulator = 0.0;
            }
        }

        if !won_this_frame {
            if let Some(remaining) = self.announce_in.as_mut() {
                *remaining -= dt;
            }
        }

        let mut announcement = None;
        if matches!(self.announce_in, Some(remaining) if remaining <= 0.0) {
            self.announce_in = None;
            announcement = self.engine.winner();
            if let Some(winner) = announcement {
                log::info!("Announcing winner: {:?}", winner);
            }
        }

        FrameOutput {
            snapshot: self.engine.snapshot(),
            ticks_run: substeps,
            events,
            announcement,
        }
    }

    /// Start a new match with the same bindings.
    /// Refused until the match is over and its winner has been announced.
    pub fn restart(&mut self) -> CommandOutcome {
        if self.announce_in.is_some() {
            log::warn!("Restart ignored while the win announcement is pending");
            return CommandOutcome::Ignored(IgnoreReason::AnnouncementPending);
        }
        let outcome = self.engine.restart();
        if outcome.is_applied() {
            self.accumulator = 0.0;
        }
        outcome
    }

    /// Forwarded to [`MatchEngine::resize`]
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.engine.resize(width, height)
    }

    pub fn is_announcement_pending(&self) -> bool {
        self.announce_in.is_some()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &MatchEngine<R> {
        &self.engine
    }
}
