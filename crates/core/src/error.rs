//! Error types for hectic-core
//!
//! Performing feedback never fails; errors only come from the
//! configuration boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the configuration surface of the performer
#[derive(Debug, Error)]
pub enum HapticError {
    /// A configuration value is out of range
    #[error("invalid configuration for `{key}`: {reason}")]
    InvalidConfiguration { key: &'static str, reason: String },

    /// Feedback kind name could not be parsed
    #[error("unknown feedback kind: {0} (expected generic, alignment or level-change)")]
    UnknownKind(String),

    /// Config file could not be read or written
    #[error("config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `PerformerConfig`
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for hectic-core operations
pub type Result<T> = std::result::Result<T, HapticError>;
