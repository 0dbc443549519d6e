//! Per-session frame pacing loop
//!
//! One pacer task runs for each streaming session. It pulls frames from
//! the shared [`FrameSource`], encodes them, and delivers them to the
//! session's sink at the target rate, heartbeating the registry on every
//! successful delivery. Cancellation is cooperative: stopping a session
//! only flips its active flag, and the pacer observes that at its next
//! predicate check.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::camera::{CameraError, FrameSource};
use crate::led::LedArbiter;
use crate::session::{SessionId, SessionRegistry};
use crate::stream::mjpeg;
use crate::stream::sink::{FrameSink, SinkError};

/// Pacing parameters for one session
#[derive(Debug, Clone, Copy)]
pub struct PacerConfig {
    /// Target frame rate
    pub target_fps: u32,

    /// JPEG quality (1..=100)
    pub quality: u8,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            target_fps: 8,
            quality: 80,
        }
    }
}

/// The per-session production loop
pub struct Pacer {
    registry: Arc<SessionRegistry>,
    arbiter: Arc<LedArbiter>,
    source: Arc<dyn FrameSource>,
    session_id: SessionId,
    config: PacerConfig,
}

impl Pacer {
    pub fn new(
        registry: Arc<SessionRegistry>,
        arbiter: Arc<LedArbiter>,
        source: Arc<dyn FrameSource>,
        session_id: SessionId,
        config: PacerConfig,
    ) -> Self {
        Self {
            registry,
            arbiter,
            source,
            session_id,
            config,
        }
    }

    /// Run until the session is deactivated, the consumer disconnects, or
    /// the task is torn down
    ///
    /// Pacing is schedule-based: the deadline advances by a fixed step per
    /// frame and the loop sleeps until it, so encode and delivery jitter
    /// does not accumulate into long-run drift. On exit by any path the
    /// session is stopped and the indicator re-arbitrated, so neither a
    /// registry entry nor an LED claim can outlive the loop.
    pub async fn run<S: FrameSink>(self, sink: S) {
        let id = self.session_id;
        let frame_interval =
            Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps.max(1)));
        let mut next_deadline = Instant::now();

        tracing::debug!(
            session = %id,
            fps = self.config.target_fps,
            quality = self.config.quality,
            "Pacer started"
        );

        loop {
            if !self.registry.is_active(id) {
                tracing::debug!(session = %id, "Pacer exiting: session deactivated");
                break;
            }

            match self.produce().await {
                Ok(part) => {
                    // Capture and encode can take a while; re-check so a stop
                    // request is honored within one capture+encode duration.
                    if !self.registry.is_active(id) {
                        tracing::debug!(session = %id, "Pacer exiting: deactivated during capture");
                        break;
                    }

                    match sink.try_send(part) {
                        Ok(()) => self.registry.heartbeat(id),
                        Err(SinkError::Disconnected) => {
                            tracing::debug!(session = %id, "Pacer exiting: consumer gone");
                            break;
                        }
                        Err(SinkError::Backpressure) => {
                            // Dropped frame, no heartbeat. A consumer that
                            // stays stalled past the idle threshold gets
                            // reaped by the watchdog.
                            tracing::trace!(session = %id, "Frame dropped: consumer behind");
                        }
                    }
                }
                Err(e) => {
                    // One bad frame does not terminate the session.
                    tracing::warn!(session = %id, error = %e, "Frame skipped");
                }
            }

            next_deadline += frame_interval;
            let now = Instant::now();
            if next_deadline > now {
                tokio::time::sleep_until(next_deadline).await;
            }
        }

        self.registry.stop(id);
        self.arbiter.apply();
    }

    async fn produce(&self) -> Result<bytes::Bytes, CameraError> {
        let raw = self.source.capture().await?;
        let jpeg = self.source.encode(&raw, self.config.quality)?;
        Ok(mjpeg::encode_part(&jpeg))
    }
}
