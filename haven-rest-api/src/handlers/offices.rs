//! Office listing endpoints

use axum::extract::State;
use haven_api_types::{OfficeListing, ResponseMetadata};
use haven_web::{ApiResponse, ListingIdPath, RawQuery};
use serde_json::Value;
use tracing::info;

use crate::{
    context::ListingsContext,
    errors::{RestError, RestResult},
    models::{FeaturedQuery, OfficeSearchQuery},
};

/// `GET /api/office-properties`
///
/// Page-based search with full pagination metadata. The filters that were
/// applied are echoed back under `filters.applied`.
pub async fn list_office_properties(
    State(ctx): State<ListingsContext>,
    RawQuery(params): RawQuery,
) -> RestResult<ApiResponse<Vec<OfficeListing>>> {
    let query = OfficeSearchQuery::from_params(&params)?;
    info!(filters = ?query.filters, page = query.page, limit = query.limit, "Listing office properties");

    let applied = serde_json::to_value(&query.filters).unwrap_or(Value::Null);
    let window = query.window();
    let result = ctx
        .repositories
        .office_repository()
        .search(query.filters, window)
        .await?;

    Ok(ApiResponse::ok(result.items)
        .with_metadata(result.meta.into())
        .with_applied_filters(applied))
}

/// `GET /api/office-properties/{id}`
pub async fn get_office_property(
    State(ctx): State<ListingsContext>,
    ListingIdPath(id): ListingIdPath,
) -> RestResult<ApiResponse<OfficeListing>> {
    info!(%id, "Fetching office property");

    ctx.repositories
        .office_repository()
        .find_by_id(id)
        .await?
        .map(ApiResponse::ok)
        .ok_or_else(|| RestError::not_found("Property not found"))
}

/// `GET /api/office-properties/featured`
pub async fn featured_office_properties(
    State(ctx): State<ListingsContext>,
    RawQuery(params): RawQuery,
) -> RestResult<ApiResponse<Vec<OfficeListing>>> {
    let FeaturedQuery { limit } = FeaturedQuery::from_params(&params)?;
    info!(limit, "Fetching featured office properties");

    let listings = ctx.repositories.office_repository().featured(limit).await?;
    Ok(ApiResponse::ok(listings).with_metadata(ResponseMetadata::with_limit(limit)))
}
