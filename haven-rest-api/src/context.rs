//! Handler dependencies
//!
//! [`AppContext`] is the router state; handlers extract only the part they
//! need through `FromRef`.

use axum::extract::FromRef;
use haven_config::AuthConfig;
use haven_interfaces::{IdentityProvider, RepositoryFactory};
use haven_web::SessionState;
use std::sync::Arc;

/// Listing repositories for the property endpoints
#[derive(Clone)]
pub struct ListingsContext {
    pub repositories: Arc<dyn RepositoryFactory>,
}

impl ListingsContext {
    pub fn new(repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self { repositories }
    }
}

/// Auth provider and cookie settings for the session endpoints
#[derive(Clone)]
pub struct AuthContext {
    pub provider: Arc<dyn IdentityProvider>,
    pub config: Arc<AuthConfig>,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: AuthConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// State for the session middleware sharing this provider and config
    pub fn session_state(&self) -> SessionState {
        SessionState {
            provider: self.provider.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Clone, FromRef)]
pub struct AppContext {
    pub listings: ListingsContext,
    pub auth: AuthContext,
}

impl AppContext {
    pub fn new(
        repositories: Arc<dyn RepositoryFactory>,
        identity: Arc<dyn IdentityProvider>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            listings: ListingsContext::new(repositories),
            auth: AuthContext::new(identity, auth_config),
        }
    }
}
