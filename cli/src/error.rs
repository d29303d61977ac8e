//! Unified error handling for the command line.

use crate::config::ConfigError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] ranker_engine::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session {0} already exists")]
    SessionExists(String),

    #[error("invalid session name: {0:?}")]
    InvalidName(String),

    #[error("invalid items: {0}")]
    InvalidItems(String),
}

/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, AppError>;
