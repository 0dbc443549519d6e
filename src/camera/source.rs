//! Frame source trait

use async_trait::async_trait;
use bytes::Bytes;

use super::frame::RawFrame;

/// Error type for capture and encode operations
///
/// Capture failures are transient from the session's point of view: the
/// pacer skips the affected delivery attempt and continues, so one bad
/// frame never terminates a stream.
#[derive(Debug, Clone)]
pub enum CameraError {
    /// Frame capture failed
    Capture(String),
    /// JPEG encoding failed
    Encode(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::Capture(msg) => write!(f, "Capture failed: {}", msg),
            CameraError::Encode(msg) => write!(f, "Encode failed: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

/// Produces raw frames on demand and compresses them for transport
///
/// Implementations wrap the actual camera stack. `capture` may block on
/// hardware I/O and is therefore async; callers re-check cancellation
/// after it returns. `encode` is CPU-bound and synchronous.
///
/// A single source instance is shared by every session, so implementations
/// must serialize hardware access internally if their device requires it.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Capture one raw frame
    async fn capture(&self) -> Result<RawFrame, CameraError>;

    /// Encode a raw frame as JPEG at the given quality (1..=100)
    fn encode(&self, frame: &RawFrame, quality: u8) -> Result<Bytes, CameraError>;
}
