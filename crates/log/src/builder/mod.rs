//! Logger builder implementation

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, TestWriter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format, Writer};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build the level filter without installing anything
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::Filter(format!("{}: {e}", self.config.level)))
    }

    /// Build and install the logger as the global default subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<()> {
        let filter = self.filter()?;
        let display = self.config.display;
        let writer = make_writer(self.config.writer);
        let registry = Registry::default().with(filter);

        // Each format has its own layer type, so each arm installs separately.
        let installed = match self.config.format {
            Format::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
            Format::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
            Format::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
        };

        installed.map_err(|e| LogError::Init(e.to_string()))?;
        tracing::debug!(level = %self.config.level, "logger installed");
        Ok(())
    }
}

fn make_writer(writer: Writer) -> BoxMakeWriter {
    match writer {
        Writer::Stderr => BoxMakeWriter::new(std::io::stderr),
        Writer::Stdout => BoxMakeWriter::new(std::io::stdout),
        Writer::Test => BoxMakeWriter::new(TestWriter::new()),
    }
}
