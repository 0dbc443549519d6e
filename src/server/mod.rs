//! HTTP streaming server
//!
//! Wires the core components together behind an axum router and owns the
//! accept loop and the background watchdog. See [`routes`] for the control
//! surface.

pub mod config;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::camera::FrameSource;
use crate::error::Result;
use crate::led::{LedArbiter, LedDriver};
use crate::session::SessionRegistry;
use crate::watchdog::Watchdog;

/// Camera streaming server
pub struct CamServer {
    state: Arc<AppState>,
}

impl CamServer {
    /// Create a server over the given frame source and LED driver
    pub fn new(
        config: ServerConfig,
        source: Arc<dyn FrameSource>,
        led: Arc<dyn LedDriver>,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let arbiter = Arc::new(LedArbiter::new(Arc::clone(&registry), led));

        Self {
            state: Arc::new(AppState {
                registry,
                arbiter,
                source,
                config,
            }),
        }
    }

    /// Get a reference to the session registry
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.state.registry
    }

    /// Get a reference to the LED arbiter
    pub fn arbiter(&self) -> &Arc<LedArbiter> {
        &self.state.arbiter
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.state.config.bind_addr
    }

    /// Build the router without binding a socket
    ///
    /// Useful for mounting the control surface inside a larger app.
    pub fn router(&self) -> axum::Router {
        routes::router(Arc::clone(&self.state))
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.state.config.bind_addr).await?;
        tracing::info!(addr = %self.state.config.bind_addr, "Camera server listening");

        let _watchdog = self.spawn_watchdog();

        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Run the server with graceful shutdown
    ///
    /// On shutdown every session is stopped and the indicator
    /// re-arbitrated, so the LED is dark when the process exits.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.state.config.bind_addr).await?;
        tracing::info!(addr = %self.state.config.bind_addr, "Camera server listening");

        let watchdog = self.spawn_watchdog();

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        watchdog.abort();
        self.state.registry.stop_all();
        self.state.arbiter.apply();
        tracing::info!("Shutdown complete");

        result.map_err(Into::into)
    }

    fn spawn_watchdog(&self) -> tokio::task::JoinHandle<()> {
        Watchdog::new(
            Arc::clone(&self.state.registry),
            Arc::clone(&self.state.arbiter),
            self.state.config.watchdog.clone(),
        )
        .spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SyntheticSource;
    use crate::led::TraceLed;

    #[test]
    fn test_server_construction() {
        let server = CamServer::new(
            ServerConfig::default(),
            Arc::new(SyntheticSource::default()),
            Arc::new(TraceLed::new()),
        );

        assert!(server.registry().is_empty());
        assert!(!server.arbiter().is_on());
        assert_eq!(server.bind_addr().port(), 5000);
    }
}
