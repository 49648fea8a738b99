//! Configuration types

use serde::{Deserialize, Serialize};

mod presets;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level filter (e.g., "info", "debug,tollgate_action=trace")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Output destination
    pub writer: Writer,

    /// Display configuration
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            writer: Writer::Stderr,
            display: DisplayConfig::default(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable with colors and indentation
    Pretty,
    /// Compact single-line output
    Compact,
    /// Structured JSON output
    Json,
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Writer {
    /// Write to stderr
    Stderr,
    /// Write to stdout
    Stdout,
    /// Write through the libtest capture
    Test,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show source location (file:line)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Use ANSI colors
    pub colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            source: false,
            target: true,
            thread_ids: false,
            colors: true,
        }
    }
}
