//! Performer configuration
//!
//! Stored as TOML:
//! ```toml
//! min_delay_ms = 100
//! trace_decisions = true
//! trace_level = "debug"
//! ```

use crate::error::{HapticError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Settings for a `FeedbackPerformer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformerConfig {
    /// Minimum delay between feedback events in milliseconds (default: 100)
    ///
    /// Signed so that a bad hand edit is caught by `validate` instead of
    /// failing to parse.
    pub min_delay_ms: i64,

    /// Emit a trace event for every pass/delay decision
    pub trace_decisions: bool,

    /// Level for decision traces (error, warn, info, debug, trace)
    pub trace_level: String,
}

impl Default for PerformerConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 100,
            trace_decisions: true,
            trace_level: "debug".to_string(),
        }
    }
}

impl PerformerConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.min_delay_ms < 0 {
            return Err(HapticError::InvalidConfiguration {
                key: "min_delay_ms",
                reason: format!("must be non-negative, got {}", self.min_delay_ms),
            });
        }

        self.parse_level()?;
        Ok(())
    }

    /// Minimum delay as a `Duration` (negative values read as zero)
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms.max(0) as u64)
    }

    /// Level for decision traces, or `None` when tracing is switched off
    pub fn trace_level(&self) -> Result<Option<Level>> {
        if !self.trace_decisions {
            return Ok(None);
        }
        self.parse_level().map(Some)
    }

    fn parse_level(&self) -> Result<Level> {
        self.trace_level
            .parse::<Level>()
            .map_err(|_| HapticError::InvalidConfiguration {
                key: "trace_level",
                reason: format!(
                    "expected one of error, warn, info, debug, trace; got '{}'",
                    self.trace_level
                ),
            })
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| HapticError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate and write to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let io_err = |source| HapticError::ConfigIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_err)
    }

    /// Commented example file
    pub fn example() -> &'static str {
        r#"# Hectic feedback configuration

# Minimum delay between two haptic events, in milliseconds.
# Requests arriving sooner block until the window has passed.
# 0 disables debouncing.
min_delay_ms = 100

# Trace every pass/delay decision through the log.
trace_decisions = true

# Level for decision traces: error, warn, info, debug, trace
trace_level = "debug"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = PerformerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_delay(), Duration::from_millis(100));
        assert_eq!(config.trace_level().unwrap(), Some(Level::DEBUG));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let config = PerformerConfig {
            min_delay_ms: -10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HapticError::InvalidConfiguration { key: "min_delay_ms", .. }));
        assert_eq!(config.min_delay(), Duration::ZERO);
    }

    #[test]
    fn test_bad_trace_level_rejected() {
        let config = PerformerConfig {
            trace_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // Level is irrelevant while tracing is off, but still validated
        let off = PerformerConfig {
            trace_decisions: false,
            ..Default::default()
        };
        assert_eq!(off.trace_level().unwrap(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PerformerConfig::from_toml_str("min_delay_ms = 50\n").unwrap();
        assert_eq!(config.min_delay_ms, 50);
        assert!(config.trace_decisions);
        assert_eq!(config.trace_level, "debug");

        assert!(PerformerConfig::from_toml_str("min_delay_ms = -1\n").is_err());
        assert!(PerformerConfig::from_toml_str("min_delay_ms = \"fast\"\n").is_err());
    }

    #[test]
    fn test_example_parses() {
        let config = PerformerConfig::from_toml_str(PerformerConfig::example()).unwrap();
        assert_eq!(config, PerformerConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        // Missing file falls back to defaults
        assert_eq!(PerformerConfig::load(&path).unwrap(), PerformerConfig::default());

        let config = PerformerConfig {
            min_delay_ms: 250,
            trace_decisions: false,
            trace_level: "info".to_string(),
        };
        config.save(&path).unwrap();

        assert_eq!(PerformerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_save_refuses_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = PerformerConfig {
            min_delay_ms: -1,
            ..Default::default()
        };
        assert!(config.save(&path).is_err());
        assert!(!path.exists());
    }
}
