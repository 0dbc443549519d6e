//! LED driver trait and built-in implementations

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// Driver for the physical status indicator
///
/// Both operations must be idempotent: turning an already-lit LED on, or an
/// already-dark LED off, is harmless. Implementations are expected to be
/// fast or non-blocking; the arbiter calls them synchronously.
pub trait LedDriver: Send + Sync {
    /// Turn the indicator on
    fn on(&self);

    /// Turn the indicator off
    fn off(&self);
}

/// Driver that logs transitions instead of touching hardware
///
/// Useful for development on machines without an indicator wired up.
#[derive(Debug, Default)]
pub struct TraceLed;

impl TraceLed {
    pub fn new() -> Self {
        Self
    }
}

impl LedDriver for TraceLed {
    fn on(&self) {
        tracing::debug!("LED on");
    }

    fn off(&self) {
        tracing::debug!("LED off");
    }
}

/// Driver that records every transition in memory
///
/// Intended for tests that assert on indicator behavior.
#[derive(Debug, Default)]
pub struct RecordingLed {
    lit: AtomicBool,
    transitions: Mutex<Vec<bool>>,
}

impl RecordingLed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the indicator is currently lit
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }

    /// Every `on`/`off` call in order, `true` for `on`
    pub fn transitions(&self) -> Vec<bool> {
        self.transitions.lock().clone()
    }
}

impl LedDriver for RecordingLed {
    fn on(&self) {
        self.lit.store(true, Ordering::SeqCst);
        self.transitions.lock().push(true);
    }

    fn off(&self) {
        self.lit.store(false, Ordering::SeqCst);
        self.transitions.lock().push(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_led() {
        let led = RecordingLed::new();
        assert!(!led.is_lit());

        led.on();
        assert!(led.is_lit());

        led.off();
        led.off();
        assert!(!led.is_lit());
        assert_eq!(led.transitions(), vec![true, false, false]);
    }
}
