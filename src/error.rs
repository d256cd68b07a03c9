//! Engine error type
//!
//! Only configuration can fail. Commands issued in the wrong match phase are
//! reported through [`crate::sim::CommandOutcome`] instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown control kind: {0:?} (expected \"human\" or \"ai\")")]
    UnknownControl(String),

    #[error("Unknown match mode: {0:?} (expected ai-vs-ai, ai-vs-human or human-vs-human)")]
    UnknownMode(String),

    #[error("Invalid settings: {field} {reason}")]
    InvalidSettings { field: &'static str, reason: String },

    #[error("Settings IO error: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidSettings {
            field,
            reason: reason.into(),
        }
    }

    /// True when the caller supplied something the engine cannot run with,
    /// as opposed to failing to read it.
    pub fn is_config_error(&self) -> bool {
        match self {
            EngineError::UnknownControl(_)
            | EngineError::UnknownMode(_)
            | EngineError::InvalidSettings { .. } => true,
            EngineError::SettingsIo(_) | EngineError::SettingsParse(_) => false,
        }
    }
}
