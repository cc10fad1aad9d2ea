//! Configuration management command
//!
//! Provides CLI interface to view and edit the feedback configuration.

use crate::system_config;
use anyhow::{Context, Result};
use hectic_core::PerformerConfig;
use owo_colors::OwoColorize;

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Feedback Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!(
        "  {} = {} {}",
        "min_delay_ms".cyan(),
        config.min_delay_ms,
        if config.min_delay_ms == 0 {
            "(debouncing disabled)".dimmed().to_string()
        } else {
            format!("({}ms between events)", config.min_delay_ms).dimmed().to_string()
        }
    );
    println!(
        "  {} = {}",
        "trace_decisions".cyan(),
        config.trace_decisions
    );
    println!(
        "  {} = {}",
        "trace_level".cyan(),
        config.trace_level
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  min_delay_ms: >= 0 (0 = no debouncing)");
    println!("  trace_level: error, warn, info, debug, trace");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    set_value(&mut config, key, value)?;

    // Validate before saving
    config.validate()
        .context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    let example = system_config::example_config();
    println!("{}", example);
    Ok(())
}

fn get_value(config: &PerformerConfig, key: &str) -> Result<String> {
    let value = match key {
        "min_delay_ms" => config.min_delay_ms.to_string(),
        "trace_decisions" => config.trace_decisions.to_string(),
        "trace_level" => config.trace_level.clone(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'hectic config list' to see available keys.",
            key
        ),
    };
    Ok(value)
}

fn set_value(config: &mut PerformerConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "min_delay_ms" => {
            let val: i64 = value.parse()
                .context("Invalid value: must be an integer number of milliseconds")?;
            config.min_delay_ms = val;
        }
        "trace_decisions" => {
            let val: bool = value.parse()
                .context("Invalid value: must be 'true' or 'false'")?;
            config.trace_decisions = val;
        }
        "trace_level" => {
            config.trace_level = value.to_ascii_lowercase();
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'hectic config list' to see available keys.",
            key
        ),
    }
    Ok(())
}
