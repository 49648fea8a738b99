//! Listener configuration sources

use std::collections::HashMap;

use parking_lot::RwLock;

use super::listener::{EventListenerConfig, ListenerKey};

/// Read access to event listener configuration.
///
/// Implementations must be cheap to query: listeners read their flag and
/// order on every intercepted operation.
pub trait ListenerConfigSource: Send + Sync {
    /// Configuration for `key`, if any.
    fn listener_config(&self, key: &ListenerKey) -> Option<EventListenerConfig>;

    /// Whether the listener is enabled.
    ///
    /// Absent configuration or an unparsable flag counts as enabled.
    fn is_enabled(&self, key: &ListenerKey) -> bool {
        self.listener_config(key)
            .and_then(|config| config.enabled())
            .unwrap_or(true)
    }

    /// The configured order, `None` if absent or unset.
    fn order(&self, key: &ListenerKey) -> Option<i32> {
        self.listener_config(key).and_then(|config| config.order())
    }
}

/// Mutable in-memory configuration source.
///
/// Useful for embedding hosts that own their configuration and for tests.
#[derive(Debug, Default)]
pub struct InMemoryConfigSource {
    entries: RwLock<HashMap<ListenerKey, EventListenerConfig>>,
}

impl InMemoryConfigSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. Returns the replaced entry.
    pub fn insert(&self, config: EventListenerConfig) -> Option<EventListenerConfig> {
        self.entries.write().insert(config.key(), config)
    }

    /// Remove the entry for `key`.
    pub fn remove(&self, key: &ListenerKey) -> Option<EventListenerConfig> {
        self.entries.write().remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl FromIterator<EventListenerConfig> for InMemoryConfigSource {
    fn from_iter<I: IntoIterator<Item = EventListenerConfig>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|c| (c.key(), c)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl ListenerConfigSource for InMemoryConfigSource {
    fn listener_config(&self, key: &ListenerKey) -> Option<EventListenerConfig> {
        self.entries.read().get(key).cloned()
    }
}
