//! Panic capture, request timeouts, development error details and the JSON
//! 404 fallback

use axum::{
    extract::{Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
};
use haven_api_types::{ApiError, Envelope};
use serde_json::json;
use std::any::Any;
use std::time::Duration;
use tracing::{error, warn};

use crate::errors::{InternalErrorDetail, WebError};

/// Whether internal error details may be shown to clients
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorExposure {
    pub expose_details: bool,
}

impl ErrorExposure {
    pub fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }
}

/// Turn a handler panic into the standard `INTERNAL_SERVER_ERROR` envelope
///
/// For use with `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    error!(panic = %detail, "Request handler panicked");
    WebError::internal(detail).into_response()
}

/// Upper bound on how long a request may run
#[derive(Debug, Clone, Copy)]
pub struct RequestTimeout(pub Duration);

/// Cut off requests that outlive their [`RequestTimeout`]
///
/// The client gets the `INTERNAL_SERVER_ERROR` envelope like any other
/// unhandled failure.
pub async fn timeout_middleware(
    State(RequestTimeout(limit)): State<RequestTimeout>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, timeout_ms = limit.as_millis() as u64, "Request timed out");
            WebError::internal(format!("Request exceeded {}ms", limit.as_millis())).into_response()
        }
    }
}

/// Attach internal error details to the response body when exposure is enabled
///
/// Outside development the body keeps the generic message and the detail is
/// dropped with the response.
pub async fn error_detail_middleware(
    State(exposure): State<ErrorExposure>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !exposure.expose_details {
        return response;
    }
    let Some(InternalErrorDetail(detail)) = response.extensions().get::<InternalErrorDetail>().cloned() else {
        return response;
    };

    let envelope = Envelope::<()>::failure(ApiError::internal().with_details(json!({ "message": detail })));
    let body = match serde_json::to_vec(&envelope) {
        Ok(body) => body,
        Err(_) => return response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, body.into())
}

/// Fallback for unmatched API routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("The requested resource was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn failing() -> Result<&'static str, WebError> {
        Err(WebError::internal("relation \"rental_listings\" does not exist"))
    }

    async fn panicking() -> &'static str {
        panic!("boom")
    }

    async fn stalled() -> &'static str {
        tokio::time::sleep(Duration::from_secs(30)).await;
        "late"
    }

    fn app(expose_details: bool) -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/panic", get(panicking))
            .route("/stalled", get(stalled))
            .fallback(handle_not_found)
            .layer(middleware::from_fn_with_state(
                RequestTimeout(Duration::from_millis(20)),
                timeout_middleware,
            ))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(
                ErrorExposure::new(expose_details),
                error_detail_middleware,
            ))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_details_hidden_in_production() {
        let (status, body) = call(app(false), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An unexpected error occurred");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_details_exposed_in_development() {
        let (status, body) = call(app(true), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["details"]["message"],
            "relation \"rental_listings\" does not exist"
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_envelope() {
        let (status, body) = call(app(true), "/panic").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["details"]["message"], "boom");
    }

    #[tokio::test]
    async fn test_timeout_becomes_envelope() {
        let (status, body) = call(app(false), "/stalled").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert!(body["error"].get("details").is_none());

        let (_, body) = call(app(true), "/stalled").await;
        assert_eq!(body["error"]["details"]["message"], "Request exceeded 20ms");
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let (status, body) = call(app(false), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
