//! TOML listener configuration
//!
//! ```toml
//! [[event_listener]]
//! type = "user-operation"
//! name = "action-user-operation"
//! enable = true
//! order = 10000
//!
//! [event_listener.properties]
//! timeout = "5s"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::{
    ConfigError, ConfigResult, EventListenerConfig, ListenerConfigSource, ListenerKey,
};

#[derive(Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    event_listener: Vec<EventListenerConfig>,
}

/// Read-only listener configuration parsed from TOML.
#[derive(Debug, Clone, Default)]
pub struct TomlConfigSource {
    entries: HashMap<ListenerKey, EventListenerConfig>,
}

impl TomlConfigSource {
    /// Parse configuration text.
    ///
    /// Every `[[event_listener]]` table needs a `type` and a `name`; the same
    /// pair may appear only once.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let document: ConfigDocument =
            toml::from_str(text).map_err(|e| ConfigError::parse(e.to_string()))?;

        let mut entries = HashMap::with_capacity(document.event_listener.len());
        for config in document.event_listener {
            let key = config.key();
            if entries.contains_key(&key) {
                return Err(ConfigError::DuplicateListener {
                    listener_type: key.listener_type,
                    name: key.name,
                });
            }
            entries.insert(key, config);
        }
        tracing::debug!(listeners = entries.len(), "loaded listener configuration");
        Ok(Self { entries })
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Number of configured listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listener is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ListenerConfigSource for TomlConfigSource {
    fn listener_config(&self, key: &ListenerKey) -> Option<EventListenerConfig> {
        self.entries.get(key).cloned()
    }
}
