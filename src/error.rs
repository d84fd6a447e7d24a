//! Error types
//!
//! The renderer core itself has no recoverable-error surface; the only
//! fallible operation in the library is loading a configuration file.

use thiserror::Error;

/// Errors that can occur while loading a [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
