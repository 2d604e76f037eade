//! Inbound frame classification for stream sockets.
//!
//! Stream clients never send payloads the server acts on; the read half only
//! exists to notice when the peer goes away.

use axum::extract::ws::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Ping,
    Pong,
    Close,
    /// Text or binary payload; ignored.
    Data { bytes_len: usize },
}

pub fn classify(msg: &Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Data { bytes_len: s.len() },
        Message::Binary(b) => Inbound::Data { bytes_len: b.len() },
        Message::Ping(_) => Inbound::Ping,
        Message::Pong(_) => Inbound::Pong,
        Message::Close(_) => Inbound::Close,
    }
}
