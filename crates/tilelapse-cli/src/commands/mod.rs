pub mod capture;
pub mod config;
pub mod list;
pub mod timelapse;

use std::path::Path;

use anyhow::{Context, Result};
use tilelapse_core::pipeline::config::TilelapseConfig;
use tracing::debug;

/// Read and validate the TOML config at `path`, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<TilelapseConfig> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: TilelapseConfig = toml::from_str(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config");
            config
        }
        None => TilelapseConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
