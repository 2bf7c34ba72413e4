use axum::{extract::FromRequestParts, http::request::Parts};
use haven_interfaces::AuthUser;

use crate::errors::WebError;

/// The signed-in user resolved by the session middleware
///
/// Rejects with `UNAUTHORIZED` when the request carries no valid session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

/// Like [`CurrentUser`] but never rejects
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| WebError::unauthorized("Authentication required"))
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}
