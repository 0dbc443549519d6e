//! LED arbitration
//!
//! Resolves the aggregate indicator state from per-session claims. The
//! invariant: the indicator is physically on if and only if at least one
//! registered session holds a claim. Deriving the state from the registry
//! on every apply, instead of toggling a standalone flag at each call site,
//! keeps overlapping sessions from desynchronizing the indicator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::led::driver::LedDriver;
use crate::session::SessionRegistry;

/// Sole writer of the shared indicator
///
/// `apply()` is invoked synchronously after every registry mutation that
/// can change the claim count, rather than on a timer, so indicator
/// latency is bounded by the call itself. Driver calls are idempotent, so
/// redundant applies are harmless.
pub struct LedArbiter {
    registry: Arc<SessionRegistry>,
    driver: Arc<dyn LedDriver>,

    /// Last state driven to the hardware, for status queries
    lit: AtomicBool,
}

impl LedArbiter {
    pub fn new(registry: Arc<SessionRegistry>, driver: Arc<dyn LedDriver>) -> Self {
        Self {
            registry,
            driver,
            lit: AtomicBool::new(false),
        }
    }

    /// Recompute the claim count and drive the indicator to match
    pub fn apply(&self) {
        let reserved = self.registry.reserved_count();
        let want_on = reserved > 0;

        self.set(want_on);
        tracing::trace!(reserved, lit = want_on, "LED state applied");
    }

    /// Whether the indicator was on as of the last driver call
    pub fn is_on(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }

    /// One-shot pulse for a capture indicator
    ///
    /// Performs an off, on, off pulse of the given duration, then restores
    /// the arbitrated state so a concurrent viewer's indicator is not left
    /// dark. The flicker other viewers see is bounded by `duration` and is
    /// tunable by the caller.
    pub async fn flash(&self, duration: Duration) {
        let was_lit = self.is_on();

        self.set(false);
        self.set(true);
        tokio::time::sleep(duration).await;
        self.set(false);

        // Claims may have changed during the pulse; recompute instead of
        // restoring the stale pre-flash state.
        self.apply();

        tracing::debug!(
            duration_ms = duration.as_millis() as u64,
            was_lit,
            restored = self.is_on(),
            "LED flashed"
        );
    }

    fn set(&self, on: bool) {
        if on {
            self.driver.on();
        } else {
            self.driver.off();
        }
        self.lit.store(on, Ordering::SeqCst);
    }
}
