//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, warn};

use crate::{
    context::ListingsContext,
    models::common::{HealthResponse, ReadinessResponse},
};

/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");
    Json(HealthResponse::healthy())
}

/// Readiness check: `503` until the data source answers
pub async fn readiness_check(State(ctx): State<ListingsContext>) -> impl IntoResponse {
    match ctx.repositories.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                data_source: None,
            }),
        ),
        Err(e) => {
            warn!("Data source not ready: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    data_source: Some(e.to_string()),
                }),
            )
        }
    }
}
