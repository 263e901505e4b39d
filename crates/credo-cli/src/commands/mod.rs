//! CLI command implementations

pub mod issue;
pub mod keygen;
pub mod serve;
pub mod status;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use credo_core::TrustConfig;

/// Path of the configuration in effect: the explicit one, else the
/// override/default lookup.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(TrustConfig::resolve_path()?),
    }
}

/// Load the trust configuration
pub fn load_config(explicit: Option<&Path>) -> Result<TrustConfig> {
    let path = config_path(explicit)?;
    tracing::debug!("Using configuration {}", path.display());
    TrustConfig::from_file(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}
