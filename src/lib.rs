//! Duel Pong - a two-paddle arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, controllers, match state machine)
//! - `driver`: Fixed-timestep frame scheduler around a running match
//! - `settings`: Data-driven tuning and match configuration
//! - `error`: Engine error type

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;

pub use driver::{Driver, FrameOutput};
pub use error::EngineError;
pub use settings::{ControlKind, MatchConfig, MatchSettings};
pub use sim::{MatchEngine, RenderSnapshot, Side, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Smallest arena a resize can produce
    pub const MIN_ARENA_WIDTH: f32 = 200.0;
    pub const MIN_ARENA_HEIGHT: f32 = 150.0;

    /// Ball defaults (distances in arena units, speeds in units per tick)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Speed multiplier applied on every paddle hit
    pub const HIT_SPEEDUP: f32 = 1.1;
    /// Full launch-angle span across the paddle face (radians)
    pub const HIT_ANGLE_SPAN: f32 = std::f32::consts::FRAC_PI_3;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its wall
    pub const PADDLE_OFFSET: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 10.0;

    /// First side to reach this score wins
    pub const WIN_SCORE: u32 = 10;

    /// AI personality ranges, drawn once per match
    pub const AI_SKILL_MIN: f32 = 0.7;
    pub const AI_SKILL_MAX: f32 = 1.2;
    pub const AI_DELAY_MIN: f32 = 0.05;
    pub const AI_DELAY_MAX: f32 = 0.15;

    /// Pause between the winning point and the win announcement (seconds)
    pub const WIN_ANNOUNCE_DELAY: f32 = 0.1;
}
