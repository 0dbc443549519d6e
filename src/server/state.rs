//! Shared handler state

use std::sync::Arc;

use crate::camera::FrameSource;
use crate::led::LedArbiter;
use crate::server::config::ServerConfig;
use crate::session::SessionRegistry;

/// State shared by all request handlers
///
/// Handlers are thin adapters: all session logic lives in the registry,
/// arbiter and pacer; this struct only wires them together.
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub arbiter: Arc<LedArbiter>,
    pub source: Arc<dyn FrameSource>,
    pub config: ServerConfig,
}
