//! Rental listing endpoints

use axum::extract::State;
use haven_api_types::{RentalListing, ResponseMetadata};
use haven_web::{ApiResponse, ListingIdPath, RawQuery};
use tracing::info;

use crate::{
    context::ListingsContext,
    errors::{RestError, RestResult},
    models::{FeaturedQuery, RentalSearchQuery},
};

/// `GET /api/properties`
///
/// Offset-based search; metadata carries `page`, `limit` and `total`.
pub async fn list_properties(
    State(ctx): State<ListingsContext>,
    RawQuery(params): RawQuery,
) -> RestResult<ApiResponse<Vec<RentalListing>>> {
    let query = RentalSearchQuery::from_params(&params)?;
    info!(filters = ?query.filters, limit = query.limit, offset = query.offset, "Listing rental properties");

    let window = query.window();
    let result = ctx
        .repositories
        .rental_repository()
        .search(query.filters, window)
        .await?;

    let metadata = ResponseMetadata::page_summary(&result.meta);
    Ok(ApiResponse::ok(result.items).with_metadata(metadata))
}

/// `GET /api/properties/{id}`
pub async fn get_property(
    State(ctx): State<ListingsContext>,
    ListingIdPath(id): ListingIdPath,
) -> RestResult<ApiResponse<RentalListing>> {
    info!(%id, "Fetching rental property");

    ctx.repositories
        .rental_repository()
        .find_by_id(id)
        .await?
        .map(ApiResponse::ok)
        .ok_or_else(|| RestError::not_found("Property not found"))
}

/// `GET /api/featured-properties`
pub async fn featured_properties(
    State(ctx): State<ListingsContext>,
    RawQuery(params): RawQuery,
) -> RestResult<ApiResponse<Vec<RentalListing>>> {
    let FeaturedQuery { limit } = FeaturedQuery::from_params(&params)?;
    info!(limit, "Fetching featured rental properties");

    let listings = ctx.repositories.rental_repository().featured(limit).await?;
    Ok(ApiResponse::ok(listings).with_metadata(ResponseMetadata::with_limit(limit)))
}
