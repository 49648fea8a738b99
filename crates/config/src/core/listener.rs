//! Event listener configuration entries

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel order meaning "not configured".
pub const ORDER_UNSET: i32 = -1;

/// Identifies one listener: the listener family and the concrete listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey {
    /// Listener family, e.g. `user-operation`.
    pub listener_type: String,
    /// Concrete listener name.
    pub name: String,
}

impl ListenerKey {
    /// Create a key.
    pub fn new(listener_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            listener_type: listener_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.listener_type, self.name)
    }
}

/// Configuration of a single event listener.
///
/// `enable` is kept as written so that values which are neither `true` nor
/// `false` can be told apart from an explicit setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListenerConfig {
    /// Listener family.
    #[serde(rename = "type")]
    pub listener_type: String,
    /// Concrete listener name.
    pub name: String,
    /// Raw enable flag, as configured.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enable: Option<String>,
    /// Execution order, or [`ORDER_UNSET`].
    #[serde(default = "unset_order")]
    pub order: i32,
    /// Free-form listener properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl EventListenerConfig {
    /// Create an entry with no enable flag and an unset order.
    pub fn new(key: ListenerKey) -> Self {
        Self {
            listener_type: key.listener_type,
            name: key.name,
            enable: None,
            order: ORDER_UNSET,
            properties: BTreeMap::new(),
        }
    }

    /// Set the enable flag.
    #[must_use]
    pub fn with_enable(mut self, enable: impl Into<String>) -> Self {
        self.enable = Some(enable.into());
        self
    }

    /// Set the execution order.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Add a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The key this entry configures.
    pub fn key(&self) -> ListenerKey {
        ListenerKey::new(&self.listener_type, &self.name)
    }

    /// The parsed enable flag.
    ///
    /// `None` if the flag is absent, blank, or not a boolean.
    pub fn enabled(&self) -> Option<bool> {
        let raw = self.enable.as_deref()?.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    /// The configured order, or `None` for the unset sentinel.
    pub fn order(&self) -> Option<i32> {
        (self.order != ORDER_UNSET).then_some(self.order)
    }
}

const fn unset_order() -> i32 {
    ORDER_UNSET
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(|flag| match flag {
        RawFlag::Bool(b) => b.to_string(),
        RawFlag::Text(s) => s,
    }))
}
