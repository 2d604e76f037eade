//! chatcast core: transport-agnostic data model, wire helpers and error types.
//!
//! This crate defines the message contract shared by the gateway and the
//! client. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `ChatcastError` instead of crashing.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{ChatcastError, ClientCode, Result};
pub use model::{Message, User};
