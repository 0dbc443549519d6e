//! End-to-end lifecycle scenarios
//!
//! Exercises the registry, arbiter, pacer and watchdog together through
//! the public API, with watchdog thresholds shrunk to milliseconds.

use std::sync::Arc;
use std::time::Duration;

use camstream_rs::camera::SyntheticSource;
use camstream_rs::led::{LedArbiter, LedDriver, RecordingLed};
use camstream_rs::session::SessionRegistry;
use camstream_rs::stream::{ChannelSink, Pacer, PacerConfig};
use camstream_rs::watchdog::{Watchdog, WatchdogConfig};

struct Harness {
    registry: Arc<SessionRegistry>,
    led: Arc<RecordingLed>,
    arbiter: Arc<LedArbiter>,
}

impl Harness {
    fn new() -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let led = Arc::new(RecordingLed::new());
        let arbiter = Arc::new(LedArbiter::new(
            Arc::clone(&registry),
            Arc::clone(&led) as Arc<dyn LedDriver>,
        ));
        Self {
            registry,
            led,
            arbiter,
        }
    }

    fn watchdog(&self, config: WatchdogConfig) -> Watchdog {
        Watchdog::new(Arc::clone(&self.registry), Arc::clone(&self.arbiter), config)
    }

    /// The core invariant: indicator on iff at least one claim is held.
    fn assert_invariant(&self) {
        assert_eq!(self.led.is_lit(), self.registry.reserved_count() > 0);
    }
}

fn fast_watchdog() -> WatchdogConfig {
    WatchdogConfig::default()
        .poll_interval(Duration::from_millis(10))
        .start_timeout(Duration::from_millis(50))
        .idle_timeout(Duration::from_millis(40))
}

#[test]
fn indicator_tracks_claims_across_arbitrary_operations() {
    let h = Harness::new();
    h.arbiter.apply();
    h.assert_invariant();

    let a = h.registry.create();
    h.registry.reserve(a).unwrap();
    h.arbiter.apply();
    h.assert_invariant();

    let b = h.registry.create();
    h.registry.reserve(b).unwrap();
    h.arbiter.apply();
    h.assert_invariant();

    h.registry.stop(a);
    h.arbiter.apply();
    h.assert_invariant();
    assert!(h.led.is_lit());

    h.registry.resume(b).unwrap();
    h.arbiter.apply();
    h.assert_invariant();

    h.registry.stop_all();
    h.arbiter.apply();
    h.assert_invariant();
    assert!(!h.led.is_lit());
    assert!(h.registry.is_empty());
}

#[tokio::test]
async fn heartbeats_then_stop_clears_everything() {
    let h = Harness::new();

    let a = h.registry.create();
    h.registry.reserve(a).unwrap();
    h.arbiter.apply();

    for _ in 0..10 {
        h.registry.heartbeat(a);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(h.led.is_lit());

    h.registry.stop(a);
    h.arbiter.apply();

    assert!(!h.led.is_lit());
    assert!(h.registry.snapshot().iter().all(|s| s.id != a));
}

#[tokio::test]
async fn session_that_never_starts_is_reaped_within_bound() {
    let h = Harness::new();
    let config = fast_watchdog();
    let bound = config.start_timeout + config.poll_interval + Duration::from_millis(30);

    let b = h.registry.create();
    h.registry.reserve(b).unwrap();
    h.arbiter.apply();
    assert!(h.led.is_lit());

    let handle = h.watchdog(config).spawn();
    tokio::time::sleep(bound).await;

    assert!(h.registry.snapshot().iter().all(|s| s.id != b));
    assert!(!h.led.is_lit());
    handle.abort();
}

#[tokio::test]
async fn stalled_session_is_reaped_within_bound() {
    let h = Harness::new();
    let config = fast_watchdog();
    let bound = config.idle_timeout + config.poll_interval + Duration::from_millis(30);

    let id = h.registry.create();
    h.registry.reserve(id).unwrap();
    h.registry.heartbeat(id);
    h.arbiter.apply();

    let handle = h.watchdog(config).spawn();
    tokio::time::sleep(bound).await;

    assert!(h.registry.is_empty());
    assert!(!h.led.is_lit());
    handle.abort();
}

#[test]
fn overlapping_sessions_share_the_indicator() {
    let h = Harness::new();

    let c = h.registry.create();
    h.registry.reserve(c).unwrap();
    h.arbiter.apply();

    let d = h.registry.create();
    h.registry.reserve(d).unwrap();
    h.arbiter.apply();
    assert!(h.led.is_lit());

    h.registry.stop(c);
    h.arbiter.apply();
    assert!(h.led.is_lit(), "indicator must stay on while D watches");

    h.registry.stop(d);
    h.arbiter.apply();
    assert!(!h.led.is_lit());
}

#[test]
fn unknown_resume_changes_nothing() {
    let h = Harness::new();

    let existing = h.registry.create();
    h.registry.reserve(existing).unwrap();
    h.arbiter.apply();

    let ghost = camstream_rs::SessionId::parse("4fe8a1c2-77d3-4b6e-9a10-3cb4e21f05aa").unwrap();
    assert!(h.registry.resume(ghost).is_err());

    assert_eq!(h.registry.len(), 1);
    assert!(h.led.is_lit());
    h.assert_invariant();
}

#[tokio::test]
async fn full_stream_lifecycle_with_pacer_and_watchdog() {
    let h = Harness::new();
    let source = Arc::new(SyntheticSource::new(16, 16));

    let id = h.registry.create();
    h.registry.reserve(id).unwrap();
    h.arbiter.apply();
    assert!(h.led.is_lit());

    let (sink, mut rx) = ChannelSink::channel(8);
    let pacer = Pacer::new(
        Arc::clone(&h.registry),
        Arc::clone(&h.arbiter),
        source,
        id,
        PacerConfig {
            target_fps: 100,
            quality: 60,
        },
    );
    let pacer_handle = tokio::spawn(pacer.run(sink));
    let watchdog_handle = h.watchdog(fast_watchdog()).spawn();

    // Frames flow and the session keeps heartbeating past the idle
    // threshold, so the watchdog leaves it alone.
    for _ in 0..8 {
        assert!(rx.recv().await.is_some());
    }
    assert_eq!(h.registry.len(), 1);

    // Viewer walks away: the pacer notices the dropped receiver and tears
    // the session down on its own.
    drop(rx);
    pacer_handle.await.unwrap();

    assert!(h.registry.is_empty());
    assert!(!h.led.is_lit());
    watchdog_handle.abort();
}
