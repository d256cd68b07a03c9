//! Match tuning and controller configuration
//!
//! Tuning is loaded from JSON; any field left out falls back to the defaults
//! in [`crate::consts`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Human,
    Ai,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Human => "human",
            ControlKind::Ai => "ai",
        }
    }

    /// Score caption for a side driven by this kind
    pub fn label(&self) -> &'static str {
        match self {
            ControlKind::Human => "Player",
            ControlKind::Ai => "AI",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "player" => Ok(ControlKind::Human),
            "ai" | "cpu" | "bot" => Ok(ControlKind::Ai),
            _ => Err(EngineError::UnknownControl(s.to_string())),
        }
    }
}

/// Controller binding for both paddles, fixed for the lifetime of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub left: ControlKind,
    pub right: ControlKind,
}

impl MatchConfig {
    pub fn new(left: ControlKind, right: ControlKind) -> Self {
        Self { left, right }
    }

    pub fn ai_vs_ai() -> Self {
        Self::new(ControlKind::Ai, ControlKind::Ai)
    }

    /// AI on the left, human on the right
    pub fn ai_vs_human() -> Self {
        Self::new(ControlKind::Ai, ControlKind::Human)
    }

    pub fn human_vs_human() -> Self {
        Self::new(ControlKind::Human, ControlKind::Human)
    }

    /// Parse a binding pair such as `"ai"` / `"human"`
    pub fn from_kinds(left: &str, right: &str) -> Result<Self, EngineError> {
        Ok(Self::new(left.parse()?, right.parse()?))
    }

    pub fn mode_name(&self) -> String {
        format!("{}-vs-{}", self.left, self.right)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::ai_vs_human()
    }
}

impl FromStr for MatchConfig {
    type Err = EngineError;

    /// Parse one of the preset modes: `ai-vs-ai`, `ai-vs-human`, `human-vs-human`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let Some((left, right)) = normalized.split_once("-vs-") else {
            return Err(EngineError::UnknownMode(s.to_string()));
        };
        Self::from_kinds(left, right).map_err(|_| EngineError::UnknownMode(s.to_string()))
    }
}

/// Match tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Resizes below these are clamped up
    pub min_arena_width: f32,
    pub min_arena_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Serve speed per axis, also the scale of the post-hit vertical term
    pub ball_base_speed: f32,
    /// Multiplier on every paddle hit (unbounded growth across a rally)
    pub hit_speedup: f32,
    /// Launch-angle span across the paddle face (radians)
    pub hit_angle_span: f32,
    /// Extra vertical speed in the colliding paddle's direction of travel (0 = off)
    pub hit_boost: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_offset: f32,
    pub paddle_speed: f32,

    // === AI personality ranges ===
    pub ai_skill_min: f32,
    pub ai_skill_max: f32,
    pub ai_delay_min: f32,
    pub ai_delay_max: f32,

    // === Match ===
    pub win_score: u32,
    /// Seconds between the winning point and the announcement
    pub win_announce_delay: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_arena_width: MIN_ARENA_WIDTH,
            min_arena_height: MIN_ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            hit_speedup: HIT_SPEEDUP,
            hit_angle_span: HIT_ANGLE_SPAN,
            hit_boost: 0.0,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_offset: PADDLE_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ai_skill_min: AI_SKILL_MIN,
            ai_skill_max: AI_SKILL_MAX,
            ai_delay_min: AI_DELAY_MIN,
            ai_delay_max: AI_DELAY_MAX,

            win_score: WIN_SCORE,
            win_announce_delay: WIN_ANNOUNCE_DELAY,
        }
    }
}

impl MatchSettings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded match settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("ball_radius", self.ball_radius)?;
        positive("ball_base_speed", self.ball_base_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("min_arena_width", self.min_arena_width)?;
        positive("min_arena_height", self.min_arena_height)?;

        if !self.paddle_offset.is_finite() || self.paddle_offset < 0.0 {
            return Err(EngineError::invalid("paddle_offset", "must be >= 0"));
        }
        if !self.hit_speedup.is_finite() || self.hit_speedup < 1.0 {
            return Err(EngineError::invalid("hit_speedup", "must be >= 1.0"));
        }
        if !(self.hit_angle_span > 0.0 && self.hit_angle_span < std::f32::consts::PI) {
            return Err(EngineError::invalid("hit_angle_span", "must be in (0, pi)"));
        }
        if !self.hit_boost.is_finite() || self.hit_boost < 0.0 {
            return Err(EngineError::invalid("hit_boost", "must be >= 0"));
        }
        if self.paddle_height >= self.min_arena_height {
            return Err(EngineError::invalid(
                "paddle_height",
                "must be smaller than min_arena_height",
            ));
        }
        let lanes = 2.0 * (self.paddle_offset + self.paddle_width + self.ball_radius);
        if self.min_arena_width <= lanes {
            return Err(EngineError::invalid(
                "min_arena_width",
                format!("must exceed both paddle lanes ({lanes})"),
            ));
        }
        if self.arena_width < self.min_arena_width || self.arena_height < self.min_arena_height {
            return Err(EngineError::invalid(
                "arena_width/arena_height",
                "must be at least the minimum arena size",
            ));
        }
        if !(self.ai_skill_min > 0.0 && self.ai_skill_min <= self.ai_skill_max)
            || !self.ai_skill_max.is_finite()
        {
            return Err(EngineError::invalid(
                "ai_skill_min/ai_skill_max",
                "must satisfy 0 < min <= max",
            ));
        }
        if !(self.ai_delay_min >= 0.0
            && self.ai_delay_min <= self.ai_delay_max
            && self.ai_delay_max < 1.0)
        {
            return Err(EngineError::invalid(
                "ai_delay_min/ai_delay_max",
                "must satisfy 0 <= min <= max < 1",
            ));
        }
        if self.win_score == 0 {
            return Err(EngineError::invalid("win_score", "must be at least 1"));
        }
        if !self.win_announce_delay.is_finite() || self.win_announce_delay < 0.0 {
            return Err(EngineError::invalid("win_announce_delay", "must be >= 0"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(field, format!("must be > 0 (got {value})")))
    }
}
