//! `CreateStream` over WebSocket.
//!
//! Responsibilities:
//! - Validate the stream request before upgrade
//! - Register a stream session whose sink writes to the socket
//! - Watch the read half for peer disconnect (the transport's cancellation)

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use tokio::sync::Mutex;
use tracing::Instrument;

use chatcast_core::error::{ChatcastError, Result};
use chatcast_core::protocol::{encode_message, StreamRequest};
use chatcast_core::{Message, User};

use crate::app_state::AppState;
use crate::realtime::{MessageSink, StreamSession};
use crate::transport::codec::{classify, Inbound};
use crate::transport::ApiError;

/// Write half of a stream socket. One frame per pushed message.
pub struct WsSink {
    tx: Mutex<SplitSink<WebSocket, WsMessage>>,
}

impl WsSink {
    pub fn new(tx: SplitSink<WebSocket, WsMessage>) -> Self {
        Self { tx: Mutex::new(tx) }
    }

    /// Best-effort close frame reporting how the session ended.
    pub async fn close(&self, outcome: &Result<()>) {
        let mut tx = self.tx.lock().await;
        let _ = tx.send(WsMessage::Close(Some(close_frame(outcome)))).await;
        let _ = tx.close().await;
    }
}

#[async_trait]
impl MessageSink for WsSink {
    async fn push(&self, msg: &Message) -> Result<()> {
        let frame = encode_message(msg)?;
        self.tx
            .lock()
            .await
            .send(WsMessage::Text(frame))
            .await
            .map_err(|e| ChatcastError::Internal(format!("ws send failed: {e}")))
    }
}

/// Close frame for a finished session: normal on peer disconnect, otherwise
/// the error's client code as the reason.
pub fn close_frame(outcome: &Result<()>) -> CloseFrame<'static> {
    match outcome {
        Ok(()) => CloseFrame {
            code: close_code::NORMAL,
            reason: Cow::Borrowed(""),
        },
        Err(e) => CloseFrame {
            code: close_code::ERROR,
            reason: Cow::Borrowed(e.client_code().as_str()),
        },
    }
}

// --------------------
// Entry
// --------------------
pub async fn stream_upgrade(
    State(app): State<AppState>,
    ws: WebSocketUpgrade,
    Query(q): Query<StreamRequest>,
) -> Response {
    let user = match q.into_user() {
        Ok(u) => u,
        Err(e) => return ApiError(e).into_response(),
    };
    let max = app.cfg().limits.max_message_bytes;

    ws.max_message_size(max)
        .on_upgrade(move |socket| async move {
            let span = tracing::info_span!("stream", conn_id = %user.id, name = %user.name);
            if let Err(e) = run_stream(app, user, socket).instrument(span).await {
                tracing::debug!(error = %e, "stream ended with error");
            }
        })
}

// --------------------
// Session
// --------------------
async fn run_stream(app: AppState, user: User, socket: WebSocket) -> Result<()> {
    let (ws_tx, mut ws_rx) = socket.split();
    let sink = Arc::new(WsSink::new(ws_tx));

    let metrics = app.metrics();
    metrics.streams_opened.inc(&[]);
    metrics.streams_active.inc(&[]);

    let session = StreamSession::register(app.registry(), &user, sink.clone());

    let peer_gone = async move {
        while let Some(frame) = ws_rx.next().await {
            match frame {
                Ok(m) => match classify(&m) {
                    Inbound::Close => break,
                    Inbound::Data { bytes_len } => {
                        tracing::trace!(bytes_len, "ignoring inbound payload on stream");
                    }
                    Inbound::Ping | Inbound::Pong => {}
                },
                Err(e) => {
                    tracing::debug!(error = %e, "stream read failed");
                    break;
                }
            }
        }
    };

    let res = session.run_until(peer_gone).await;
    metrics.streams_active.dec(&[]);
    sink.close(&res).await;
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_close_frame_carries_client_code() {
        let frame = close_frame(&Err(ChatcastError::delivery("b", "broken pipe")));
        assert_eq!(frame.code, close_code::ERROR);
        assert_eq!(frame.reason, "DELIVERY_FAILED");
    }

    #[test]
    fn peer_disconnect_closes_normally() {
        let frame = close_frame(&Ok(()));
        assert_eq!(frame.code, close_code::NORMAL);
        assert!(frame.reason.is_empty());
    }
}
