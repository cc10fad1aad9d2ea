//! User-level configuration file
//!
//! Lives at `<config dir>/hectic/config.toml`, or wherever `HECTIC_CONFIG`
//! points.

use anyhow::{Context, Result};
use hectic_core::PerformerConfig;
use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HECTIC_CONFIG";

/// Path of the config file (may not exist yet)
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("hectic").join("config.toml"))
}

/// Load the config file, or defaults if there is none
pub fn load() -> Result<PerformerConfig> {
    let Some(path) = config_file_path() else {
        return Ok(PerformerConfig::default());
    };

    PerformerConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Validate and write the config file
pub fn save(config: &PerformerConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    config
        .save(&path)
        .with_context(|| format!("Failed to save config to {}", path.display()))
}

/// Write defaults if the file does not exist yet; returns true if created
pub fn init_if_missing() -> Result<bool> {
    let path = config_file_path().context("Could not determine config file path")?;
    if path.exists() {
        return Ok(false);
    }
    save(&PerformerConfig::default())?;
    Ok(true)
}

/// Example configuration text
pub fn example_config() -> &'static str {
    PerformerConfig::example()
}
