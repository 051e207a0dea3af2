//! Configuration loading and types for docpost.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

pub use types::{HtmlBackend, MarkdownConfig, PublishConfig};

/// Default config file name, looked up in the output directory.
pub const DEFAULT_CONFIG_FILE: &str = "docpost.yaml";

/// Prefix for environment overrides, e.g. `DOCPOST_CONVERTER__PROGRAM`.
pub const ENV_PREFIX: &str = "DOCPOST";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("config file not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    #[error("{0}")]
    Validation(String),
}
