//! Error types for u-staffing.
//!
//! The scheduling core reports expected outcomes (an unfillable role, an
//! inconsistent assignment) as values. This type covers everything around
//! it: files, parsing, configuration and plan replay.

use thiserror::Error;

use crate::config::ConfigError;
use crate::io::ParseError;
use crate::replay::ReplayError;
use crate::validation::ValidationError;

/// Main error type for u-staffing operations.
#[derive(Debug, Error)]
pub enum StaffingError {
    /// File could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed problem or plan file.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input failed validation.
    #[error("Invalid input: {}", join(.0))]
    Validation(Vec<ValidationError>),

    /// A submitted plan does not fit the problem.
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for StaffingError {
    fn from(errors: Vec<ValidationError>) -> Self {
        StaffingError::Validation(errors)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for u-staffing operations.
pub type Result<T> = std::result::Result<T, StaffingError>;
