//! Logger error types

use thiserror::Error;

/// Errors raised while installing the logger
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The level filter could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Failed to install logger: {0}")]
    Init(String),
}

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;
