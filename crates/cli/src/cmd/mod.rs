//! CLI command implementations

pub mod burst;
pub mod config;
pub mod perform;
pub mod wait;
