use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use haven_api_types::{Envelope, ResponseMetadata};
use serde::Serialize;
use serde_json::Value;

/// Successful response rendered as the standard envelope
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    envelope: Envelope<T>,
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            envelope: Envelope::success(data),
            status: StatusCode::OK,
        }
    }

    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        self.envelope = self.envelope.with_metadata(metadata);
        self
    }

    /// Echo the filters that were applied under `filters.applied`
    pub fn with_applied_filters(mut self, applied: Value) -> Self {
        self.envelope = self.envelope.with_applied_filters(applied);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
