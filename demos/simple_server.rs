//! Simple camera streaming server example
//!
//! Run with: cargo run --example simple_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example simple_server                    # binds to 0.0.0.0:5000
//!   cargo run --example simple_server localhost          # binds to 127.0.0.1:5000
//!   cargo run --example simple_server 127.0.0.1:5001     # binds to 127.0.0.1:5001
//!
//! ## Watching
//!
//! With a browser: open http://localhost:5000/camera/stream
//!
//! With curl (headers only):
//!   curl -iN http://localhost:5000/camera/stream | head
//!
//! ## Control surface
//!
//!   curl http://localhost:5000/status
//!   curl http://localhost:5000/camera/snapshot -o snap.jpg
//!   curl -X POST http://localhost:5000/camera/stop
//!
//! ## Features
//!
//! - Session resume: reconnect with ?session=<X-Session-Id value>
//! - Status LED arbitration: the (trace) indicator is on iff someone watches
//! - Watchdog: dead viewers are reaped automatically, no leaked claims
//!
//! This demo uses the synthetic test-pattern source, so it runs anywhere;
//! point a `FrameSource` implementation at real hardware for actual video.

use std::net::SocketAddr;
use std::sync::Arc;

use camstream_rs::camera::SyntheticSource;
use camstream_rs::led::TraceLed;
use camstream_rs::{CamServer, ServerConfig};

fn parse_bind_addr() -> SocketAddr {
    let default: SocketAddr = "0.0.0.0:5000".parse().unwrap();

    match std::env::args().nth(1) {
        None => default,
        Some(arg) => {
            if let Ok(addr) = arg.parse() {
                return addr;
            }
            if arg == "localhost" {
                return "127.0.0.1:5000".parse().unwrap();
            }
            eprintln!("Unrecognized bind address '{}', using {}", arg, default);
            default
        }
    }
}

#[tokio::main]
async fn main() -> camstream_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,camstream_rs=debug".into()),
        )
        .init();

    let config = ServerConfig::with_addr(parse_bind_addr());

    println!("Camera server on http://{}", config.bind_addr);
    println!("  stream:   GET  /camera/stream");
    println!("  snapshot: GET  /camera/snapshot");
    println!("  stop:     POST /camera/stop");
    println!("  status:   GET  /status");

    let server = CamServer::new(
        config,
        Arc::new(SyntheticSource::default()),
        Arc::new(TraceLed::new()),
    );

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
