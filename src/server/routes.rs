//! HTTP control surface
//!
//! Thin adapters between the transport and the core: every handler calls
//! registry/arbiter operations, spawns a pacer where needed, and formats
//! the result. A viewer disconnecting is never a server fault here; only
//! genuinely invalid requests produce client errors.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;

use crate::server::state::AppState;
use crate::session::SessionId;
use crate::stream::{mjpeg, ChannelSink, Pacer, PacerConfig};

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/camera/stream", get(stream))
        .route("/camera/snapshot", get(snapshot))
        .route("/camera/stop", post(stop))
        .route("/status", get(status))
        .route("/health", get(health))
        .with_state(state)
}

/// JSON error payload with a status code
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct StreamParams {
    /// Resume id from a previous stream response
    session: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StopRequest {
    session: Option<String>,
}

#[derive(Debug, Serialize)]
struct StopResponse {
    stopped: usize,
    led_on: bool,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    active_sessions: usize,
    led_on: bool,
}

/// `GET /camera/stream[?session=<id>]`
///
/// Creates (or resumes) a session, grants its indicator claim, spawns the
/// pacer and streams MJPEG parts until the session ends. The session id is
/// echoed in the `X-Session-Id` header so the viewer can resume later.
async fn stream(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StreamParams>,
) -> Result<Response, ApiError> {
    let session_id = match params.session {
        Some(raw) => {
            let id = SessionId::parse(&raw).ok_or_else(|| {
                ApiError::new(StatusCode::BAD_REQUEST, "malformed session id")
            })?;
            state
                .registry
                .resume(id)
                .map_err(|e| ApiError::new(StatusCode::NOT_FOUND, e.to_string()))?;
            id
        }
        None => state.registry.create(),
    };

    // The claim precedes the first frame so the indicator lights as soon
    // as someone is watching, not at first delivery.
    state
        .registry
        .reserve(session_id)
        .map_err(|e| ApiError::new(StatusCode::NOT_FOUND, e.to_string()))?;
    state.arbiter.apply();

    let (sink, rx) = ChannelSink::channel(state.config.sink_capacity);
    let pacer = Pacer::new(
        Arc::clone(&state.registry),
        Arc::clone(&state.arbiter),
        Arc::clone(&state.source),
        session_id,
        PacerConfig {
            target_fps: state.config.target_fps,
            quality: state.config.stream_quality,
        },
    );
    tokio::spawn(pacer.run(sink));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mjpeg::CONTENT_TYPE)
        .header(
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, max-age=0",
        )
        .header(header::PRAGMA, "no-cache")
        .header(header::CONNECTION, "close")
        .header("X-Session-Id", session_id.to_string())
        .body(Body::from_stream(ReceiverStream::new(rx)))
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// `GET /camera/snapshot`
///
/// Pulses the indicator, then captures and returns a single frame.
async fn snapshot(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    state.arbiter.flash(state.config.flash_duration).await;

    let frame = state
        .source
        .capture()
        .await
        .map_err(|e| ApiError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))?;
    let jpeg = state
        .source
        .encode(&frame, state.config.snapshot_quality)
        .map_err(|e| ApiError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(jpeg))
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// `POST /camera/stop`
///
/// Stops the session named in the body, or every session when no body (or
/// no session field) is given. Idempotent: unknown ids stop zero sessions.
async fn stop(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StopRequest>>,
) -> Result<Json<StopResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let stopped = match request.session {
        Some(raw) => {
            let id = SessionId::parse(&raw).ok_or_else(|| {
                ApiError::new(StatusCode::BAD_REQUEST, "malformed stop target")
            })?;
            usize::from(state.registry.stop(id))
        }
        None => state.registry.stop_all(),
    };
    state.arbiter.apply();

    Ok(Json(StopResponse {
        stopped,
        led_on: state.arbiter.is_on(),
    }))
}

/// `GET /status`
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        active_sessions: state.registry.len(),
        led_on: state.arbiter.is_on(),
    })
}

/// `GET /health`
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
