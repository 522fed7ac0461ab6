//! Error types for Sylva.
//!
//! Queries against a loaded collection never fail; they report absence through
//! `Option` or empty results. Errors only come from the boundary layers:
//! census parsing, command parsing, configuration and file I/O.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SylvaError>;

#[derive(Debug, Error)]
pub enum SylvaError {
    /// A census line or query argument could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A command line had an unknown verb or malformed arguments.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SylvaError {
    fn from(err: serde_json::Error) -> Self {
        SylvaError::Serialization(err.to_string())
    }
}
