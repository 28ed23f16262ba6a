//! Core error model.

use thiserror::Error;

/// Result type used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level error.
///
/// Deterministic decoding failures only; storage and publishing failures
/// belong to the crates that own those concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A raw write-kind code does not name any known `MessageType`.
    #[error("unknown message type code: {0}")]
    UnknownMessageType(u8),

    /// A status string did not match any known status.
    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

impl CoreError {
    pub fn invalid_status(msg: impl Into<String>) -> Self {
        Self::InvalidStatus(msg.into())
    }
}
