//! Testing utilities for haven-storage
//!
//! Enable with the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! haven-storage = { path = "../haven-storage", features = ["testing"] }
//! ```

pub mod mocks;

pub use mocks::{MockDataSourceImpl, MockIdentityProviderImpl};

use haven_interfaces::{AuthSession, AuthUser};

/// A signed-in user as the auth provider would return it
pub fn sample_user(id: &str) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        email: Some(format!("{id}@haven.example")),
        role: Some("authenticated".to_string()),
        created_at: None,
        last_sign_in_at: None,
    }
}

/// A session whose tokens embed the given suffix
pub fn sample_session(user_id: &str, suffix: &str) -> AuthSession {
    AuthSession {
        access_token: format!("access-{suffix}"),
        refresh_token: format!("refresh-{suffix}"),
        expires_in: 3600,
        user: sample_user(user_id),
    }
}
