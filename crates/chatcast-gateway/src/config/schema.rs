use std::net::SocketAddr;

use serde::Deserialize;
use chatcast_core::error::{ChatcastError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatcastConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub limits: Limits,
}

impl Default for ChatcastConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            limits: Limits::default(),
        }
    }
}

impl ChatcastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChatcastError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| ChatcastError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:50051".into()
}
fn default_log_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    /// Cap for stream frames and broadcast request bodies.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

impl Limits {
    pub fn validate(&self) -> Result<()> {
        if !(256..=1_048_576).contains(&self.max_message_bytes) {
            return Err(ChatcastError::BadRequest(
                "limits.max_message_bytes must be between 256 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_message_bytes() -> usize {
    64 * 1024
}
