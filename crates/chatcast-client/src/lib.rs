//! chatcast client library.
//!
//! Opens a `CreateStream` subscription, publishes messages, and renders
//! received messages for a line-oriented terminal.

pub mod client;
pub mod identity;
pub mod render;

pub use client::{Client, MessageStream};
pub use identity::{generate_user, title_case};
pub use render::render_line;
