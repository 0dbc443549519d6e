//! Camera streaming server library
//!
//! Exposes a single physical camera and a single status LED to multiple
//! remote viewers over MJPEG-over-HTTP, while guaranteeing the LED always
//! reflects whether anyone is actually watching.
//!
//! # Architecture
//!
//! ```text
//!   [HTTP handler] ──create/resume──► SessionRegistry ◄──scan── Watchdog
//!        │                                 ▲   ▲
//!        │ spawn                 heartbeat │   │ reserved_count
//!        ▼                                 │   │
//!    Pacer task ──frames──► FrameSink      │ LedArbiter ──► LedDriver
//!        │                                 │
//!        └───── FrameSource (capture + encode)
//! ```
//!
//! - [`session::SessionRegistry`] is the authoritative table of live
//!   viewing sessions and the single source of truth for "is anyone
//!   watching".
//! - [`stream::Pacer`] runs once per session, pulling frames from the
//!   shared [`camera::FrameSource`] at the target rate and heartbeating
//!   the registry on every delivery.
//! - [`led::LedArbiter`] derives the indicator state from the registry's
//!   reference-counted claims; it is the only writer of the LED driver.
//! - [`watchdog::Watchdog`] reaps sessions that never started consuming or
//!   went silent, so dead connections cannot leak claims.
//!
//! Capture hardware and the LED are reached through the
//! [`camera::FrameSource`] and [`led::LedDriver`] traits; implement them
//! for your hardware stack, or use the bundled synthetic/trace versions
//! for development.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use camstream_rs::camera::SyntheticSource;
//! use camstream_rs::led::TraceLed;
//! use camstream_rs::{CamServer, ServerConfig};
//!
//! # async fn example() -> camstream_rs::Result<()> {
//! let server = CamServer::new(
//!     ServerConfig::default(),
//!     Arc::new(SyntheticSource::default()),
//!     Arc::new(TraceLed::new()),
//! );
//!
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod error;
pub mod led;
pub mod server;
pub mod session;
pub mod stream;
pub mod watchdog;

pub use error::{Error, Result};
pub use server::{CamServer, ServerConfig};
pub use session::{SessionId, SessionRegistry};
pub use watchdog::WatchdogConfig;
