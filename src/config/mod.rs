//! Configuration management for cwforge

pub mod schema;

pub use schema::Config;

use crate::error::{ForgeError, ForgeResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Project-local configuration file name
pub const CONFIG_FILE: &str = ".cwforge.toml";

/// Load the project-local configuration, falling back to defaults when the
/// file does not exist.
pub async fn load(project_dir: &Path) -> ForgeResult<Config> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!("No {} found, using defaults", CONFIG_FILE);
        return Ok(Config::default());
    }

    debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| ForgeError::io(format!("reading config from {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| ForgeError::ConfigInvalid {
        path,
        reason: e.to_string(),
    })
}
