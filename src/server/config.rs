//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::watchdog::WatchdogConfig;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Target frame rate for streaming sessions
    pub target_fps: u32,

    /// JPEG quality for streamed frames (1..=100)
    pub stream_quality: u8,

    /// JPEG quality for one-shot snapshots (1..=100)
    pub snapshot_quality: u8,

    /// Duration of the indicator pulse around a snapshot
    pub flash_duration: Duration,

    /// Per-session delivery buffer, in frames
    ///
    /// A small buffer absorbs transport jitter; a consumer that falls more
    /// than this far behind starts losing frames.
    pub sink_capacity: usize,

    /// Watchdog thresholds
    pub watchdog: WatchdogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            target_fps: 8,
            stream_quality: 80,
            snapshot_quality: 90,
            flash_duration: Duration::from_millis(250),
            sink_capacity: 8,
            watchdog: WatchdogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the target frame rate
    pub fn target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Set the streaming JPEG quality
    pub fn stream_quality(mut self, quality: u8) -> Self {
        self.stream_quality = quality.clamp(1, 100);
        self
    }

    /// Set the snapshot JPEG quality
    pub fn snapshot_quality(mut self, quality: u8) -> Self {
        self.snapshot_quality = quality.clamp(1, 100);
        self
    }

    /// Set the snapshot flash duration
    pub fn flash_duration(mut self, duration: Duration) -> Self {
        self.flash_duration = duration;
        self
    }

    /// Set the watchdog thresholds
    pub fn watchdog(mut self, watchdog: WatchdogConfig) -> Self {
        self.watchdog = watchdog;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.target_fps, 8);
        assert_eq!(config.stream_quality, 80);
        assert_eq!(config.snapshot_quality, 90);
        assert_eq!(config.flash_duration, Duration::from_millis(250));
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:5001".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr.port(), 5001);
    }

    #[test]
    fn test_builder_quality_clamped() {
        let config = ServerConfig::default().stream_quality(0).snapshot_quality(200);

        assert_eq!(config.stream_quality, 1);
        assert_eq!(config.snapshot_quality, 100);
    }

    #[test]
    fn test_builder_fps_floor() {
        let config = ServerConfig::default().target_fps(0);

        assert_eq!(config.target_fps, 1);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .target_fps(15)
            .stream_quality(70)
            .flash_duration(Duration::from_millis(100))
            .watchdog(WatchdogConfig::default().idle_timeout(Duration::from_secs(10)));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.target_fps, 15);
        assert_eq!(config.stream_quality, 70);
        assert_eq!(config.flash_duration, Duration::from_millis(100));
        assert_eq!(config.watchdog.idle_timeout, Duration::from_secs(10));
    }
}
