use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use haven_api_types::ListingId;
use std::collections::HashMap;

use crate::errors::WebError;
use crate::validation::{invalid_listing_id, validate_listing_id, FieldErrors, INVALID_QUERY};

/// Raw query string as a name → value map
///
/// Repeated names keep the last value. Typed parsing happens afterwards in
/// [`crate::QueryValidator`] so that every problem can be reported at once.
#[derive(Debug, Clone, Default)]
pub struct RawQuery(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for RawQuery
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                let mut errors = FieldErrors::default();
                errors.add_form_error(e.body_text());
                WebError::validation(INVALID_QUERY, errors)
            })?;

        Ok(RawQuery(params.into_iter().collect()))
    }
}

/// `{id}` path segment validated as a canonical listing id
#[derive(Debug, Clone, Copy)]
pub struct ListingIdPath(pub ListingId);

impl<S> FromRequestParts<S> for ListingIdPath
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_listing_id())?;

        validate_listing_id(&raw).map(ListingIdPath)
    }
}
