//! Core configuration functionality

pub mod error;
pub mod listener;
pub mod source;

pub use error::{ConfigError, ConfigResult};
pub use listener::{EventListenerConfig, ListenerKey, ORDER_UNSET};
pub use source::{InMemoryConfigSource, ListenerConfigSource};
