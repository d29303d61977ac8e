//! Error types for the ranking engine.

use crate::{ItemName, SessionId};
use thiserror::Error;

/// All possible errors from the ranking engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Submission errors
    #[error("comparison already exists: {0} vs {1}")]
    DuplicateComparison(ItemName, ItemName),

    #[error("invalid comparison items: {0} vs {1}")]
    InvalidPair(ItemName, ItemName),

    #[error("winner index out of range: {index} (pair has {len} items)")]
    WinnerOutOfRange { index: usize, len: usize },

    // Session errors
    #[error("comparison mode not supported: {0}")]
    UnsupportedMode(String),

    #[error("duplicate item name: {0}")]
    DuplicateItemName(ItemName),

    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    // State errors
    #[error("invalid engine state: {0}")]
    InvalidState(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::DuplicateComparison("tea".into(), "coffee".into());
        assert_eq!(err.to_string(), "comparison already exists: tea vs coffee");

        let err = Error::WinnerOutOfRange { index: 2, len: 2 };
        assert_eq!(err.to_string(), "winner index out of range: 2 (pair has 2 items)");

        let err = Error::UnsupportedMode("elo".into());
        assert_eq!(err.to_string(), "comparison mode not supported: elo");
    }
}
