//! REST API error type
//!
//! Handlers return [`RestResult`]; every variant renders through
//! [`WebError`] so the envelope and status mapping live in one place.

use axum::response::{IntoResponse, Response};
use haven_interfaces::{AuthError, DatabaseError};
use haven_web::WebError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestError {
    #[error(transparent)]
    Web(#[from] WebError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Auth provider error: {0}")]
    Auth(#[from] AuthError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::Web(WebError::not_found(message))
    }

    pub fn into_web_error(self) -> WebError {
        match self {
            RestError::Web(err) => err,
            RestError::Database(err) => err.into(),
            RestError::Auth(AuthError::InvalidSession) => WebError::unauthorized("Authentication required"),
            RestError::Auth(err) => WebError::internal(err.to_string()),
            RestError::Internal(message) => WebError::internal(message),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.into_web_error().into_response()
    }
}
