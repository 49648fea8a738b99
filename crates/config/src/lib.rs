//! # Tollgate Config
//!
//! Event listener configuration: whether a listener is enabled and where it
//! runs in the listener chain.
//!
//! ```rust
//! use tollgate_config::{EventListenerConfig, InMemoryConfigSource, ListenerConfigSource, ListenerKey};
//!
//! let key = ListenerKey::new("user-operation", "action-user-operation");
//! let source = InMemoryConfigSource::new();
//! source.insert(EventListenerConfig::new(key.clone()).with_enable("false").with_order(5000));
//!
//! assert!(!source.is_enabled(&key));
//! assert_eq!(source.order(&key), Some(5000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod loaders;

pub use crate::core::{
    ConfigError, ConfigResult, EventListenerConfig, InMemoryConfigSource, ListenerConfigSource,
    ListenerKey, ORDER_UNSET,
};
#[cfg(feature = "toml")]
pub use crate::loaders::TomlConfigSource;
