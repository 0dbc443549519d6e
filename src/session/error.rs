//! Session error types

use super::id::SessionId;

/// Error type for session registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session id is unknown or was already reaped
    NotFound(SessionId),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for SessionError {}
