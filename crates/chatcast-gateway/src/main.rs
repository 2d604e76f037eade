//! chatcast gateway
//!
//! - `GET /v1/stream?id=..&name=..`: long-lived outbound message stream
//! - `POST /v1/broadcast`: publish one message to every open stream
//!
//! Usage: `chatcast-gateway [config.yaml]` (defaults apply if the file is absent).

use tracing_subscriber::{fmt, EnvFilter};

use chatcast_core::error::Result;
use chatcast_gateway::{app_state, config, server};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "chatcast.yaml".to_string());
    let cfg = config::load_or_default(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.server.log_filter));
    fmt().with_env_filter(filter).init();

    let listen = cfg.server.listen_addr()?;
    let state = app_state::AppState::new(cfg)?;

    tracing::info!(%listen, config = %path, "chatcast-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| chatcast_core::ChatcastError::Internal(format!("bind {listen} failed: {e}")))?;

    server::serve(listener, state, server::shutdown_signal()).await
}
