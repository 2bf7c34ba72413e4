//! Client error types

use haven_api_types::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{}: {}", .error.code, .error.message)]
    Api { status: u16, error: ApiError },

    #[error("Response carried neither data nor error (status {status})")]
    EmptyResponse { status: u16 },
}

impl ClientError {
    /// Message suitable for showing next to a failed listing view
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Api { error, .. } if !error.message.is_empty() => error.message.clone(),
            ClientError::Api { .. } | ClientError::EmptyResponse { .. } => "Failed to fetch data".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::EmptyResponse { status } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
