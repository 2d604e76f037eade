//! Shared error type across chatcast crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// The stream call could not be opened.
    StreamUnavailable,
    /// A push to this stream failed and the stream was dropped.
    DeliveryFailed,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::StreamUnavailable => "STREAM_UNAVAILABLE",
            ClientCode::DeliveryFailed => "DELIVERY_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChatcastError>;

/// Unified error type used by core, gateway and client.
#[derive(Debug, Error)]
pub enum ChatcastError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The transport could not open a stream call. Never retried.
    #[error("stream establish failed: {0}")]
    StreamEstablish(String),
    /// Pushing a message to one connection failed.
    #[error("delivery to {id} failed: {reason}")]
    Delivery { id: String, reason: String },
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ChatcastError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ChatcastError::BadRequest(_) => ClientCode::BadRequest,
            ChatcastError::StreamEstablish(_) => ClientCode::StreamUnavailable,
            ChatcastError::Delivery { .. } => ClientCode::DeliveryFailed,
            ChatcastError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ChatcastError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn delivery(id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ChatcastError::Delivery {
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_maps_to_stable_code() {
        let err = ChatcastError::delivery("abc", "broken pipe");
        assert_eq!(err.client_code().as_str(), "DELIVERY_FAILED");
        assert_eq!(err.to_string(), "delivery to abc failed: broken pipe");
    }
}
