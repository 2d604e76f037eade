//! Realtime runtime for the chatcast gateway.
//!
//! Registry of live streams and the session handler that owns each one.

pub mod core;

pub use self::core::{Connection, ConnectionRegistry, MessageSink, RegistryHandle, SessionState, StreamSession};
