//! Common error types for the raga service

use thiserror::Error;

/// Common result type for raga operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the raga crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A taxonomy table lists the same key twice
    #[error("Duplicate key in {table} table: {key}")]
    DuplicateKey { table: &'static str, key: String },
}
