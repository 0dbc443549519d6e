//! Status indicator control
//!
//! The physical LED is a single shared actuator. The [`LedArbiter`] is its
//! only writer: it derives the desired state from the session registry's
//! reference-counted claims and applies it through a [`LedDriver`].
//!
//! Hardware access lives behind the [`LedDriver`] trait so the core never
//! links against GPIO libraries; the crate ships [`TraceLed`] (logs
//! transitions) and [`RecordingLed`] (remembers them, for tests).

pub mod arbiter;
pub mod driver;

pub use arbiter::LedArbiter;
pub use driver::{LedDriver, RecordingLed, TraceLed};
