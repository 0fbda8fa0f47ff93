//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not a valid configuration document
    #[error("Failed to parse table configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
