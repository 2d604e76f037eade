use std::time::{SystemTime, UNIX_EPOCH};

use futures_util::StreamExt;
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use chatcast_core::error::{ChatcastError, Result};
use chatcast_core::protocol::{decode_message, Ack, ErrorBody};
use chatcast_core::{Message, User};

/// Milliseconds since the Unix epoch, as used for message timestamps.
pub fn timestamp_now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string()
}

/// Handle to one gateway (`host:port`).
#[derive(Clone)]
pub struct Client {
    addr: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            http: reqwest::Client::new(),
        }
    }

    fn stream_url(&self, user: &User) -> Result<Url> {
        let mut url = Url::parse(&format!("ws://{}/v1/stream", self.addr))
            .map_err(|e| ChatcastError::BadRequest(format!("invalid server address: {e}")))?;
        url.query_pairs_mut()
            .append_pair("id", &user.id)
            .append_pair("name", &user.name);
        Ok(url)
    }

    /// Open a `CreateStream` call. Failures are surfaced as-is, never retried.
    pub async fn connect(&self, user: &User) -> Result<MessageStream> {
        let url = self.stream_url(user)?;
        let (ws, _resp) = connect_async(url.as_str())
            .await
            .map_err(|e| ChatcastError::StreamEstablish(e.to_string()))?;
        tracing::debug!(addr = %self.addr, user = %user.name, "stream open");
        Ok(MessageStream { ws })
    }

    /// `BroadcastMessage`: returns once the server finished the fan-out.
    pub async fn publish(&self, msg: &Message) -> Result<Ack> {
        let resp = self
            .http
            .post(format!("http://{}/v1/broadcast", self.addr))
            .json(msg)
            .send()
            .await
            .map_err(|e| ChatcastError::Internal(format!("publish failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<Ack>()
                .await
                .map_err(|e| ChatcastError::Internal(format!("invalid ack: {e}")));
        }

        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => format!("{}: {}", body.code, body.msg),
            Err(_) => status.to_string(),
        };
        if status.is_client_error() {
            Err(ChatcastError::BadRequest(detail))
        } else {
            Err(ChatcastError::Internal(detail))
        }
    }
}

/// Server-streamed messages of one `CreateStream` call.
pub struct MessageStream {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl MessageStream {
    /// Next broadcast message; `None` once the server closed the stream.
    pub async fn recv(&mut self) -> Option<Result<Message>> {
        while let Some(frame) = self.ws.next().await {
            match frame {
                Ok(WsMessage::Text(t)) => return Some(decode_message(t.as_str())),
                Ok(WsMessage::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(ChatcastError::Internal(format!("stream read failed: {e}")))),
            }
        }
        None
    }

    /// Close the call from the client side.
    pub async fn close(mut self) -> Result<()> {
        self.ws
            .close(None)
            .await
            .map_err(|e| ChatcastError::Internal(format!("stream close failed: {e}")))
    }
}
