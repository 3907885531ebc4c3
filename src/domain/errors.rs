//! Domain error types
//!
//! This module defines the error hierarchy for PFT Extract. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main PFT Extract error type
///
/// This is the primary error type used throughout the library. Parser, I/O
/// and serializer failures are converted into it at the module boundary.
#[derive(Debug, Error)]
pub enum PftError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed XML or an unreadable document structure
    #[error("XML error: {0}")]
    Xml(String),

    /// A structural element the record cannot be built without
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// A numeric attribute that is present but not a number
    #[error("Invalid number in {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl PftError {
    /// Builds an [`PftError::InvalidNumber`] for a field and its raw value
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        PftError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Per-file failure recorded by a batch run
#[derive(Debug, Clone)]
pub struct FileErrorDetail {
    /// Input file that failed
    pub path: String,

    /// Error message
    pub message: String,
}

impl FileErrorDetail {
    /// Creates a new file error detail
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PftError {
    fn from(err: std::io::Error) -> Self {
        PftError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PftError {
    fn from(err: serde_json::Error) -> Self {
        PftError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for PftError {
    fn from(err: csv::Error) -> Self {
        PftError::Csv(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PftError {
    fn from(err: toml::de::Error) -> Self {
        PftError::Configuration(format!("TOML parse error: {err}"))
    }
}
