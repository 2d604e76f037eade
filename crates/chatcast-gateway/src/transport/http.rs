//! Unary endpoints: `BroadcastMessage`, health and metrics.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use tokio::time::Instant;

use chatcast_core::protocol::{decode_message, Ack};

use crate::app_state::AppState;
use crate::transport::ApiError;

/// Run one broadcast pass; returns once every push has resolved.
///
/// Per-connection failures never fail the call; they are listed in the ack.
pub async fn broadcast(State(app): State<AppState>, body: String) -> Result<Json<Ack>, ApiError> {
    let msg = decode_message(&body)?;

    let started = Instant::now();
    let report = app.dispatcher().broadcast(&msg).await;

    let metrics = app.metrics();
    metrics.broadcast_duration.observe(&[], started.elapsed());
    let outcome = if report.is_complete() { "clean" } else { "partial" };
    metrics.broadcasts.inc(&[("outcome", outcome)]);
    metrics.delivery_failures.add(&[], report.failed.len() as u64);

    tracing::info!(
        from = %msg.user.name,
        recipients = report.recipients,
        failed = report.failed.len(),
        "broadcast"
    );
    Ok(Json(Ack { failed: report.failed }))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn metrics(State(app): State<AppState>) -> impl IntoResponse {
    let registry_size = app.registry().len() as u64;
    let body = app.metrics().render(&[("chatcast_registry_size", registry_size)]);
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
