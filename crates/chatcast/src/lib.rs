//! Top-level facade crate for chatcast.
//!
//! Re-exports core types, the gateway library and the client so users can depend on a single crate.

pub mod core {
    pub use chatcast_core::*;
}

pub mod gateway {
    pub use chatcast_gateway::*;
}

pub mod client {
    pub use chatcast_client::*;
}
