//! Error types for logbook-core
//!
//! Reading conversation logs never fails outright: resolution misses,
//! malformed lines and missing tool results all degrade to partial output.
//! These variants cover the surfaces around that core (configuration,
//! logging setup, and the fallible `try_*` entry points).

use thiserror::Error;

/// Main error type for the logbook-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid session file pattern
    #[error("invalid session file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for logbook-core
pub type Result<T> = std::result::Result<T, Error>;
