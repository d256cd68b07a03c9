//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Left paddle before right, everywhere
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod engine;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{PaddleContact, StepReport, hit_angle, paddle_contact, step_ball};
pub use controller::{AiProfile, ControlView, Controller, PaddleIntent};
pub use engine::{CommandOutcome, IgnoreReason, MatchEngine};
pub use rng::{RandomSource, SeededRng};
pub use snapshot::{BallView, PaddleView, RenderSnapshot};
pub use state::{Arena, Ball, MatchEvent, MatchPhase, Paddle, Score, Side};
pub use tick::{TickInput, TickReport, tick};
