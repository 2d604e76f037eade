//! Shared application state for the chatcast gateway.
//!
//! Wires the connection registry, the broadcast dispatcher and metrics
//! together. Cheap to clone; handed to every axum handler.

use std::sync::Arc;

use chatcast_core::error::Result;

use crate::config::ChatcastConfig;
use crate::dispatch::BroadcastDispatcher;
use crate::obs::GatewayMetrics;
use crate::realtime::ConnectionRegistry;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ChatcastConfig>,
    registry: Arc<ConnectionRegistry>,
    dispatcher: Arc<BroadcastDispatcher>,
    metrics: Arc<GatewayMetrics>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ChatcastConfig) -> Result<Self> {
        cfg.validate()?;

        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = Arc::new(BroadcastDispatcher::new(Arc::clone(&registry)));

        Ok(Self {
            cfg: Arc::new(cfg),
            registry,
            dispatcher,
            metrics: Arc::new(GatewayMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &ChatcastConfig {
        &self.cfg
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn dispatcher(&self) -> Arc<BroadcastDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }
}
