//! The match engine: one owned value holding everything a match needs
//!
//! Lifecycle is `start` → `tick` (repeatedly) → `restart` once the match is
//! over. Physics and the state machine live in [`super::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::controller::Controller;
use super::rng::{RandomSource, SeededRng};
use super::snapshot::RenderSnapshot;
use super::state::{Arena, Ball, MatchPhase, Paddle, Score, Side};
use super::tick::{TickInput, TickReport, tick};
use crate::error::EngineError;
use crate::settings::{MatchConfig, MatchSettings};

/// Why a command was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Restart is only accepted once the match is over
    MatchInProgress(MatchPhase),
    /// The win announcement has not been delivered yet
    AnnouncementPending,
}

/// Result of a lifecycle command. Ignored commands leave all state untouched.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

/// A running two-paddle match
#[derive(Debug, Clone)]
pub struct MatchEngine<R: RandomSource = SeededRng> {
    pub(crate) settings: MatchSettings,
    pub(crate) config: MatchConfig,
    pub(crate) arena: Arena,
    pub(crate) ball: Ball,
    pub(crate) left: Paddle,
    pub(crate) right: Paddle,
    pub(crate) left_control: Controller,
    pub(crate) right_control: Controller,
    pub(crate) score: Score,
    pub(crate) phase: MatchPhase,
    pub(crate) winner: Option<Side>,
    pub(crate) rng: R,
    pub(crate) ticks: u64,
}

impl MatchEngine<SeededRng> {
    /// Start a match with a seeded generator
    pub fn start(
        config: MatchConfig,
        settings: MatchSettings,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let engine = Self::with_rng(config, settings, SeededRng::new(seed))?;
        log::info!("Match seed: {}", seed);
        Ok(engine)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> MatchEngine<R> {
    /// Start a match drawing randomness from `rng`.
    ///
    /// Fails without creating an engine when the settings are unusable.
    pub fn with_rng(
        config: MatchConfig,
        settings: MatchSettings,
        mut rng: R,
    ) -> Result<Self, EngineError> {
        settings.validate()?;

        let arena = Arena::new(settings.arena_width, settings.arena_height);
        let left_control = Controller::bind(config.left, &settings, &mut rng);
        let right_control = Controller::bind(config.right, &settings, &mut rng);

        let engine = Self {
            ball: opening_ball(&arena, &settings),
            left: Paddle::centered(Side::Left, &arena, &settings),
            right: Paddle::centered(Side::Right, &arena, &settings),
            settings,
            config,
            arena,
            left_control,
            right_control,
            score: Score::new(),
            phase: MatchPhase::Rallying,
            winner: None,
            rng,
            ticks: 0,
        };

        log::info!(
            "Match started: {} ({:?} / {:?})",
            config.mode_name(),
            engine.left_control,
            engine.right_control
        );
        Ok(engine)
    }

    /// Advance one tick
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        tick(self, input)
    }

    /// Reinitialise scores, ball, paddles and AI personalities.
    /// Only accepted once the match is over.
    pub fn restart(&mut self) -> CommandOutcome {
        if self.phase != MatchPhase::MatchOver {
            log::warn!("Restart ignored during {:?}", self.phase);
            return CommandOutcome::Ignored(IgnoreReason::MatchInProgress(self.phase));
        }

        self.left_control = Controller::bind(self.config.left, &self.settings, &mut self.rng);
        self.right_control = Controller::bind(self.config.right, &self.settings, &mut self.rng);
        self.ball = opening_ball(&self.arena, &self.settings);
        self.left = Paddle::centered(Side::Left, &self.arena, &self.settings);
        self.right = Paddle::centered(Side::Right, &self.arena, &self.settings);
        self.score = Score::new();
        self.phase = MatchPhase::Rallying;
        self.winner = None;
        self.ticks = 0;

        log::info!("Match restarted: {}", self.config.mode_name());
        CommandOutcome::Applied
    }

    /// Change the arena size. Degenerate sizes are clamped to the minimum
    /// arena; returns true when that happened. Paddles are pulled back in
    /// bounds on the next tick, the ball is left where it is.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let (arena, clamped) = Arena::clamped(width, height, &self.settings);
        if clamped {
            log::warn!(
                "Resize to {}x{} clamped to {}x{}",
                width,
                height,
                arena.width,
                arena.height
            );
        }
        self.arena = arena;
        clamped
    }

    /// Read-only view for the rendering shell
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn controller(&self, side: Side) -> &Controller {
        match side {
            Side::Left => &self.left_control,
            Side::Right => &self.right_control,
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Ticks processed since start or the last restart
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Opening serve: centre of the arena, heading down and to the right
fn opening_ball(arena: &Arena, settings: &MatchSettings) -> Ball {
    Ball::new(
        arena.center(),
        Vec2::splat(settings.ball_base_speed),
        settings.ball_radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ControlKind;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_start_initial_state() {
        let engine =
            MatchEngine::start(MatchConfig::ai_vs_human(), MatchSettings::default(), 42).unwrap();
        assert_eq!(engine.phase(), MatchPhase::Rallying);
        assert_eq!(engine.score(), Score::new());
        assert_eq!(engine.ball().pos, Vec2::new(400.0, 300.0));
        assert_eq!(engine.ball().vel, Vec2::new(4.0, 4.0));
        assert_eq!(engine.paddle(Side::Left).y, 250.0);
        assert_eq!(engine.paddle(Side::Right).y, 250.0);
        assert_eq!(engine.controller(Side::Left).kind(), ControlKind::Ai);
        assert_eq!(engine.controller(Side::Right).kind(), ControlKind::Human);
        assert_eq!(engine.seed(), 42);
    }

    #[test]
    fn test_start_rejects_bad_settings() {
        let settings = MatchSettings {
            paddle_speed: -1.0,
            ..Default::default()
        };
        let err = MatchEngine::start(MatchConfig::ai_vs_ai(), settings, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSettings { field: "paddle_speed", .. }));
    }

    #[test]
    fn test_ai_profiles_drawn_in_side_order() {
        // Left draws (skill, delay) first, then right
        let rng = ScriptedRng::new(&[0.0, 0.0, 0.999, 0.999]);
        let engine =
            MatchEngine::with_rng(MatchConfig::ai_vs_ai(), MatchSettings::default(), rng).unwrap();
        let left = engine.controller(Side::Left).profile().unwrap();
        let right = engine.controller(Side::Right).profile().unwrap();
        assert!((left.skill_factor - 0.7).abs() < 1e-6);
        assert!((left.reaction_delay - 0.05).abs() < 1e-6);
        assert!(right.skill_factor > 1.19);
        assert!(right.reaction_delay > 0.149);
    }

    #[test]
    fn test_restart_ignored_mid_rally() {
        let mut engine =
            MatchEngine::start(MatchConfig::human_vs_human(), MatchSettings::default(), 7)
                .unwrap();
        engine.score.left = 4;
        let outcome = engine.restart();
        assert_eq!(
            outcome,
            CommandOutcome::Ignored(IgnoreReason::MatchInProgress(MatchPhase::Rallying))
        );
        assert_eq!(engine.score.left, 4);
        assert_eq!(engine.phase(), MatchPhase::Rallying);
    }

    #[test]
    fn test_restart_from_match_over_resets_everything() {
        let mut engine =
            MatchEngine::start(MatchConfig::ai_vs_ai(), MatchSettings::default(), 7).unwrap();
        let first_profile = *engine.controller(Side::Left).profile().unwrap();
        engine.score = Score { left: 10, right: 3 };
        engine.phase = MatchPhase::MatchOver;
        engine.winner = Some(Side::Left);
        engine.left.y = 0.0;
        engine.ball.pos = Vec2::new(900.0, 20.0);

        assert!(engine.restart().is_applied());
        assert_eq!(engine.score(), Score::new());
        assert_eq!(engine.phase(), MatchPhase::Rallying);
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.paddle(Side::Left).y, 250.0);
        assert_eq!(engine.ball().pos, Vec2::new(400.0, 300.0));
        assert_eq!(engine.ticks(), 0);
        // Personalities are redrawn from the continuing stream
        assert_ne!(*engine.controller(Side::Left).profile().unwrap(), first_profile);
    }

    #[test]
    fn test_resize_clamps_degenerate_sizes() {
        let mut engine =
            MatchEngine::start(MatchConfig::ai_vs_ai(), MatchSettings::default(), 3).unwrap();
        let ball_before = *engine.ball();
        assert!(engine.resize(0.0, -20.0));
        assert_eq!(engine.arena(), Arena::new(200.0, 150.0));
        assert_eq!(*engine.ball(), ball_before);

        assert!(!engine.resize(1280.0, 720.0));
        assert_eq!(engine.arena(), Arena::new(1280.0, 720.0));
    }
}
