//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::IntakeError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &IntakeError) -> String {
    match e {
        IntakeError::ConfigError(msg) => format!("configuration: {}", msg),
        IntakeError::NotAFile(path) => format!("{} is not a regular file", path.display()),
        other => other.to_string(),
    }
}
