//! Wire contracts for the two remote calls.
//!
//! - `CreateStream`: the client opens a stream with a [`StreamRequest`]; the
//!   server pushes each broadcast [`Message`](crate::Message) as one JSON text frame.
//! - `BroadcastMessage`: the client posts one JSON message and receives an [`Ack`].
//!
//! Decoders never panic: malformed input is reported as `ChatcastError`.

pub mod wire;

pub use wire::{decode_message, encode_message, Ack, ErrorBody, StreamRequest};
