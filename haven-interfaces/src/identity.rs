//! Hosted authentication provider interface
//!
//! Haven never stores credentials. Sign-in happens at the provider; the
//! server only exchanges callback codes, resolves access tokens to users and
//! refreshes expired sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session is missing or expired")]
    InvalidSession,

    #[error("Authorization code rejected: {message}")]
    CodeExchange { message: String },

    #[error("Auth provider unreachable: {message}")]
    Connection { message: String },

    #[error("Unexpected auth provider response: {message}")]
    Provider { message: String },
}

/// Identity resolved from an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Token pair issued by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
    pub user: AuthUser,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an access token to its user; `InvalidSession` when expired or revoked
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    /// Trade an OAuth / magic-link callback code for a session
    async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, AuthError>;

    /// Obtain a fresh token pair from a refresh token
    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
