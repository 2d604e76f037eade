//! Lightweight in-process metrics (dependency-free).
//!
//! Stream and broadcast counters stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::GatewayMetrics;
