//! Session watchdog
//!
//! Background task that evicts sessions whose consumer stopped pulling
//! frames without a clean stop, so a dead connection can never leak an
//! indicator claim or a registry entry. It scans a point-in-time snapshot
//! on a fixed poll interval and therefore tolerates the registry shrinking
//! concurrently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::led::LedArbiter;
use crate::session::SessionRegistry;

/// Watchdog thresholds
///
/// All three are tunable so tests can shrink them to milliseconds.
#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    /// How often the registry is scanned
    pub poll_interval: Duration,

    /// Grace period for a session that has never delivered a frame
    pub start_timeout: Duration,

    /// Maximum silence after the last delivered frame
    pub idle_timeout: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            start_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(3),
        }
    }
}

impl WatchdogConfig {
    /// Set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the never-started grace period
    pub fn start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = timeout;
        self
    }

    /// Set the idle threshold
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

/// Periodic reaper for stalled and never-started sessions
pub struct Watchdog {
    registry: Arc<SessionRegistry>,
    arbiter: Arc<LedArbiter>,
    config: WatchdogConfig,
}

impl Watchdog {
    pub fn new(
        registry: Arc<SessionRegistry>,
        arbiter: Arc<LedArbiter>,
        config: WatchdogConfig,
    ) -> Self {
        Self {
            registry,
            arbiter,
            config,
        }
    }

    /// Scan the registry once and reap what qualifies
    ///
    /// Reaping rules, checked per snapshot entry:
    /// - not active: removed immediately (an inactive session must never
    ///   linger past one poll)
    /// - no heartbeat and older than `start_timeout`: the consumer never
    ///   began pulling frames, likely a connection that died mid-setup
    /// - heartbeat older than `idle_timeout`: the consumer stalled or
    ///   vanished without a clean disconnect
    ///
    /// Returns the number of sessions reaped.
    pub fn run_once(&self) -> usize {
        let now = Instant::now();
        let mut reaped = 0;

        for session in self.registry.snapshot() {
            let reason = if !session.active {
                Some("inactive")
            } else {
                match session.last_heartbeat {
                    None if now.duration_since(session.created_at) > self.config.start_timeout => {
                        Some("never started")
                    }
                    Some(last) if now.duration_since(last) > self.config.idle_timeout => {
                        Some("stalled")
                    }
                    _ => None,
                }
            };

            if let Some(reason) = reason {
                self.registry.stop(session.id);
                self.arbiter.apply();
                tracing::info!(session = %session.id, reason, "Session reaped");
                reaped += 1;
            }
        }

        reaped
    }

    /// Spawn the background poll loop
    ///
    /// Returns a handle that can be used to abort the task on shutdown.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.poll_interval);
            loop {
                ticker.tick().await;
                self.run_once();
            }
        })
    }
}
