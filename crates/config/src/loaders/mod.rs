//! Configuration loader implementations

#[cfg(feature = "toml")]
mod file;

#[cfg(feature = "toml")]
pub use file::TomlConfigSource;
