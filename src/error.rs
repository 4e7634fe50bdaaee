//! Error types for Filedrop.

use thiserror::Error;

use crate::file::FilenameError;

/// Common error type for Filedrop.
#[derive(Error, Debug)]
pub enum FiledropError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A client-supplied filename was rejected by the sanitizer.
    #[error("invalid filename: {0}")]
    InvalidFilename(#[from] FilenameError),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Filedrop operations.
pub type Result<T> = std::result::Result<T, FiledropError>;
