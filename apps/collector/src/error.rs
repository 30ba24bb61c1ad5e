//! Domain error types for the test results uploader.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every variant is fatal to the run; the binary decides how to terminate.

use crate::config::ConfigError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Opening or reading a result artifact failed
    #[error("File system error: {0}")]
    FileSystem(String),

    /// A result artifact could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Building the XML document or JSON payload failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The upload request could not be sent
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upload endpoint answered with a non-success status
    #[error("Upload rejected with status {status}: {body}")]
    UploadRejected { status: u16, body: String },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(format!("JSON encoding error: {}", err))
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::Serialization(format!("XML encoding error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}
