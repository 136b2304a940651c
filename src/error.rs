//! Error types for barq.
//!
//! Error codes are organized by category:
//!
//! - **BQ-E001 to BQ-E099**: Catalog loading and validation errors
//! - **BQ-E100 to BQ-E199**: Query and preference errors
//! - **BQ-E900 to BQ-E999**: Internal and miscellaneous errors
//!
//! The engine itself never surfaces errors for malformed user input: a bad
//! code shape, an unsatisfiable key combo, or an invalid arithmetic
//! expression all degrade to "no result". These variants cover the CLI
//! boundary (files, JSON, arguments).

use thiserror::Error;

/// Main error type for barq operations.
#[derive(Error, Debug)]
pub enum BarqError {
    /// Catalog file not found at the specified path.
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: String },

    /// Catalog file is not valid JSON or has the wrong shape.
    #[error("Catalog invalid: {reason}")]
    CatalogInvalid { reason: String },

    /// Empty query string provided.
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// Invalid preference value provided.
    #[error("Invalid preference {name}: {reason}")]
    InvalidPreference { name: String, reason: String },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl BarqError {
    /// Returns the error code for this error.
    pub const fn error_code(&self) -> &'static str {
        match self {
            BarqError::CatalogNotFound { .. } => "BQ-E001",
            BarqError::CatalogInvalid { .. } => "BQ-E002",
            BarqError::EmptyQuery => "BQ-E101",
            BarqError::InvalidPreference { .. } => "BQ-E102",
            BarqError::IoError(_) => "BQ-E901",
            BarqError::JsonError(_) => "BQ-E902",
        }
    }

    /// Returns the severity level for this error.
    pub const fn severity(&self) -> &'static str {
        match self {
            BarqError::InvalidPreference { .. } => "warning",
            _ => "error",
        }
    }

    /// Returns remediation hints for this error, if available.
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            BarqError::CatalogNotFound { .. } => {
                Some("Ensure the catalog path is correct and the file exists.")
            }
            BarqError::CatalogInvalid { .. } => {
                Some("The catalog must be a JSON object with name, version, and items fields.")
            }
            BarqError::EmptyQuery => Some("Provide a non-empty query string."),
            BarqError::InvalidPreference { .. } => {
                Some("Check the preference flags against --help.")
            }
            BarqError::IoError(_) => Some("Check file permissions and disk space."),
            BarqError::JsonError(_) => Some("Check that the input is well-formed JSON."),
        }
    }
}
