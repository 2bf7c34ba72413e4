//! Storage error types

use haven_interfaces::DatabaseError;
use thiserror::Error;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<StorageError> for DatabaseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Http(e) => DatabaseError::Connection { message: e.to_string() },
            other => DatabaseError::Internal {
                message: other.to_string(),
            },
        }
    }
}
