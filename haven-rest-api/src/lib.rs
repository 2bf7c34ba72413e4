//! # Haven REST API
//!
//! HTTP endpoints for browsing rental and office listings, plus the small
//! amount of session plumbing the front end needs (auth callback, sign-out,
//! account identity).
//!
//! ## Endpoints
//!
//! - `GET /api/properties`, `/api/properties/{id}`, `/api/featured-properties`
//! - `GET /api/office-properties`, `/api/office-properties/{id}`,
//!   `/api/office-properties/featured`
//! - `GET /api/account`
//! - `GET /auth/callback`, `POST /auth/signout`
//! - `GET /health`, `GET /ready`
//!
//! Every API response uses the `{ data, error, metadata }` envelope.
//!
//! ## Architecture
//!
//! Handlers receive their collaborators through [`AppContext`]: a
//! [`RepositoryFactory`](haven_interfaces::RepositoryFactory) for listing
//! reads and an [`IdentityProvider`](haven_interfaces::IdentityProvider) for
//! sessions. Tests inject the in-memory data source and mock providers.
//!
//! ```rust,no_run
//! use haven_rest_api::{create_rest_app, AppConfig, AppContext};
//!
//! # async fn example(context: AppContext) -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_rest_app(context, AppConfig::default());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

pub use app::{create_rest_app, AppConfig};
pub use context::{AppContext, AuthContext, ListingsContext};
pub use errors::{RestError, RestResult};
pub use models::*;
