//! Axum router wiring.
//!
//! - `/v1/stream` WebSocket upgrade (CreateStream)
//! - `/v1/broadcast` unary publish (BroadcastMessage)
//! - `/healthz`, `/metrics`

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.cfg().limits.max_message_bytes;
    Router::new()
        .route("/v1/stream", get(transport::ws::stream_upgrade))
        .route("/v1/broadcast", post(transport::http::broadcast))
        .route("/healthz", get(transport::http::healthz))
        .route("/metrics", get(transport::http::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
