//! Transport layer (HTTP + WebSocket).
//!
//! - `GET /v1/stream` upgrades to a WebSocket carrying one stream session
//! - `POST /v1/broadcast` runs one broadcast pass and acks it
//! - health and metrics endpoints

pub mod codec;
pub mod http;
pub mod ws;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use chatcast_core::error::{ChatcastError, ClientCode};
use chatcast_core::protocol::ErrorBody;

/// Error wrapper rendered as a JSON body with a mapped status.
#[derive(Debug)]
pub struct ApiError(pub ChatcastError);

impl From<ChatcastError> for ApiError {
    fn from(e: ChatcastError) -> Self {
        Self(e)
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::StreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::DeliveryFailed => StatusCode::BAD_GATEWAY,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.client_code());
        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}
