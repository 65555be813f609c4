//! Error types for the intake file ingestion library.
//!
//! Scanning, type filters, name resolution and path resolution never fail:
//! unreadable entries produce nothing, unusable accept tokens match nothing and
//! malformed names degrade to an opaque slug. Errors only surface from byte
//! reads, configuration, logging setup and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Library-wide error type
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for IntakeError {
    fn from(err: config::ConfigError) -> Self {
        IntakeError::ConfigError(err.to_string())
    }
}
