//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format, Writer};

impl Config {
    /// Create configuration from environment variables
    ///
    /// Reads `TOLLGATE_LOG` (falling back to `RUST_LOG`) and
    /// `TOLLGATE_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("TOLLGATE_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("TOLLGATE_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "pretty" => Format::Pretty,
                "json" => Format::Json,
                _ => Format::Compact,
            };
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (captured by the test harness)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            writer: Writer::Test,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
        }
    }
}
