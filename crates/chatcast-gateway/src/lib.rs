//! chatcast gateway library entry.
//!
//! This crate wires the transport, the connection registry, the broadcast
//! dispatcher and stream sessions into a runnable server. It is consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod realtime;
pub mod router;
pub mod server;
pub mod transport;
