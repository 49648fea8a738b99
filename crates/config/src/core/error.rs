//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading listener configuration.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {message}")]
    Parse {
        /// Parser message
        message: String,
    },

    /// The same listener was configured more than once
    #[error("Duplicate configuration for listener {listener_type}/{name}")]
    DuplicateListener {
        /// Listener type
        listener_type: String,
        /// Listener name
        name: String,
    },
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Standard result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
