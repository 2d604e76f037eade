//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use chatcast_core::error::{ChatcastError, Result};

pub use schema::{ChatcastConfig, Limits, ServerSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ChatcastConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| ChatcastError::Internal(format!("read config {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ChatcastConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(ChatcastConfig::default());
    }
    load_from_file(path)
}

pub fn load_from_str(s: &str) -> Result<ChatcastConfig> {
    let cfg: ChatcastConfig = serde_yaml::from_str(s)
        .map_err(|e| ChatcastError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
