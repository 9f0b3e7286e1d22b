//! Error types for vault access, configuration, and command execution.

use thiserror::Error;

/// Errors raised by vault storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("File is not readable as text: {0}")]
    NotReadable(String),

    #[error("Failed to move to trash: {0}")]
    TrashFailed(String),
}

/// Top-level error returned by library operations and CLI commands.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Prompt error: {0}")]
    PromptError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
