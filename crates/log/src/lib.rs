//! # Tollgate Log
//!
//! Installs a `tracing` subscriber for hosts that embed the dispatch core
//! and for test binaries.
//!
//! ```rust,no_run
//! tollgate_log::init_with(tollgate_log::Config::production()).expect("logger");
//! tracing::info!(listener = "action-user-operation", "listener ready");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, Format, Writer};
pub use error::{LogError, LogResult};

/// Install a logger configured from the environment.
pub fn init() -> LogResult<()> {
    init_with(Config::from_env())
}

/// Install a logger with the given configuration.
pub fn init_with(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}

/// Install the test logger, ignoring an already-installed subscriber.
///
/// Safe to call from every test in a binary.
pub fn init_test() {
    let _ = init_with(Config::test());
}
