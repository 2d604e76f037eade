//! Realtime core components for the broadcast gateway.
//!
//! Connection registry, per-stream session lifecycle, and the sink seam the
//! transport plugs into.

mod connection;
mod registry;
mod session;

pub use connection::{Connection, MessageSink};
pub use registry::{ConnectionRegistry, RegistryHandle};
pub use session::{SessionState, StreamSession};
