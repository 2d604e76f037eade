//! Dispatcher module exports.
//!
//! Re-exports the broadcast dispatcher so downstream consumers can depend on
//! this module directly.

pub mod dispatcher;

pub use dispatcher::{BroadcastDispatcher, BroadcastReport};
