//! Router and middleware stack

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use haven_config::{CorsConfig, HavenConfig};
use haven_web::{
    cors_layer, error_detail_middleware, handle_not_found, panic_response, request_id_middleware,
    session_middleware, timeout_middleware, ErrorExposure, RequestTimeout,
};
use std::path::PathBuf;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Attach internal error details to 500 responses
    pub expose_error_details: bool,
    pub request_timeout: Duration,
    /// Front-end assets served for every non-API path
    pub static_dir: Option<PathBuf>,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            expose_error_details: false,
            request_timeout: Duration::from_secs(30),
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_config(config: &HavenConfig) -> Self {
        Self {
            expose_error_details: config.server.environment.is_development(),
            request_timeout: config.server.request_timeout,
            static_dir: config.server.static_dir.clone(),
            cors: config.server.cors.clone(),
        }
    }
}

/// Create the complete application
///
/// Layers, outermost first: request id, tracing, CORS, error detail
/// exposure, panic capture, timeout, session adapter.
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let session_state = context.auth.session_state();

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/auth/callback", get(handlers::auth_callback))
        .route("/auth/signout", post(handlers::sign_out))
        .nest("/api", api_router());

    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => app.fallback(handle_not_found),
    };

    app.with_state(context)
        .layer(middleware::from_fn_with_state(session_state, session_middleware))
        .layer(middleware::from_fn_with_state(
            RequestTimeout(config.request_timeout),
            timeout_middleware,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            ErrorExposure::new(config.expose_error_details),
            error_detail_middleware,
        ))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

fn api_router() -> Router<AppContext> {
    Router::new()
        .route("/properties", get(handlers::list_properties))
        .route("/properties/{id}", get(handlers::get_property))
        .route("/featured-properties", get(handlers::featured_properties))
        .route("/office-properties", get(handlers::list_office_properties))
        .route("/office-properties/featured", get(handlers::featured_office_properties))
        .route("/office-properties/{id}", get(handlers::get_office_property))
        .route("/account", get(handlers::get_account))
        .fallback(handle_not_found)
}
