//! Crate-level error types
//!
//! Component modules define their own focused error enums
//! ([`SessionError`], [`CameraError`]); this module aggregates them into a
//! single [`Error`] for callers that run the whole server.

use crate::camera::CameraError;
use crate::session::SessionError;

/// Convenience result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// I/O error (socket bind, accept, etc.)
    Io(std::io::Error),
    /// Session lifecycle error
    Session(SessionError),
    /// Frame capture or encode error
    Camera(CameraError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Session(e) => write!(f, "Session error: {}", e),
            Error::Camera(e) => write!(f, "Camera error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Session(e) => Some(e),
            Error::Camera(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Error::Session(e)
    }
}

impl From<CameraError> for Error {
    fn from(e: CameraError) -> Self {
        Error::Camera(e)
    }
}
