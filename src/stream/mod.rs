//! Frame streaming
//!
//! This module provides:
//! - MJPEG multipart wire format encoding
//! - The [`FrameSink`] delivery abstraction
//! - The per-session [`Pacer`] loop

pub mod mjpeg;
pub mod pacer;
pub mod sink;

pub use mjpeg::{encode_part, CONTENT_TYPE};
pub use pacer::{Pacer, PacerConfig};
pub use sink::{ChannelSink, FrameSink, SinkError};
