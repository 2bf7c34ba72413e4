//! Web-specific error types and conversions
//!
//! Every error leaves the server as the standard envelope with `data: null`.
//! Internal failures are reduced to a generic message; the original detail is
//! carried in a response extension so that development builds can expose it
//! (see [`crate::middleware::error_detail_middleware`]).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use haven_api_types::{ApiError, Envelope, ErrorCode};
use haven_interfaces::DatabaseError;
use thiserror::Error;
use tracing::{error, warn};

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("{message}")]
    Validation { message: String, details: FieldErrors },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Database error: {message}")]
    Database { message: String, cause: Option<String> },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

pub type WebResult<T> = Result<T, WebError>;

/// Detail of an internal failure, kept out of the response body by default
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl WebError {
    pub fn validation(message: impl Into<String>, details: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Store failure with a client-facing message; the cause is only logged
    pub fn database(message: impl Into<String>, cause: &DatabaseError) -> Self {
        Self::Database {
            message: message.into(),
            cause: Some(cause.to_string()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            WebError::Validation { .. } => ErrorCode::ValidationError,
            WebError::Unauthorized { .. } => ErrorCode::Unauthorized,
            WebError::NotFound { .. } => ErrorCode::NotFound,
            WebError::Database { .. } => ErrorCode::DatabaseError,
            WebError::Internal { .. } => ErrorCode::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.error_code().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The error object as clients see it
    pub fn to_api_error(&self) -> ApiError {
        match self {
            WebError::Validation { message, details } => {
                ApiError::validation(message.clone(), details.to_value())
            }
            WebError::Unauthorized { message } => ApiError::unauthorized(message.clone()),
            WebError::NotFound { message } => ApiError::not_found(message.clone()),
            WebError::Database { message, .. } => ApiError::database(message.clone()),
            WebError::Internal { .. } => ApiError::internal(),
        }
    }

    fn log(&self) {
        match self {
            WebError::Validation { details, .. } => {
                warn!(field_errors = ?details.field_errors, "Rejected request parameters")
            }
            WebError::Unauthorized { message } | WebError::NotFound { message } => {
                warn!("{}", message)
            }
            WebError::Database { message, cause } => {
                error!(cause = cause.as_deref().unwrap_or("unknown"), "{}", message)
            }
            WebError::Internal { message } => error!("Unhandled error: {}", message),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let body = Envelope::<()>::failure(self.to_api_error());
        let mut response = (status, Json(body)).into_response();

        if let WebError::Internal { message } = self {
            response.extensions_mut().insert(InternalErrorDetail(message));
        }

        response
    }
}

impl From<DatabaseError> for WebError {
    fn from(err: DatabaseError) -> Self {
        match &err {
            DatabaseError::NotFound { .. } => WebError::not_found("Property not found"),
            _ => WebError::database("Failed to query properties", &err),
        }
    }
}
