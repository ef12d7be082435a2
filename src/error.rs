//! Error types
//!
//! Nothing here is fatal to the simulation: callers log and carry on.

use thiserror::Error;

/// Errors surfaced by configuration, kind parsing and collaborators
#[derive(Debug, Error)]
pub enum AquariumError {
    #[error("unknown creature kind `{0}`")]
    UnknownCreatureKind(String),

    #[error("unknown power-up kind `{0}`")]
    UnknownPowerUpKind(String),

    #[error("settings file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to load sound `{path}`: {reason}")]
    Audio { path: String, reason: String },
}
