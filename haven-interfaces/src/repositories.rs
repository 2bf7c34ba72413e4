//! Listing repository interfaces

use async_trait::async_trait;
use haven_api_types::{ListResponse, ListingId, OfficeListing, PageWindow, RentalListing};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseError;

// =============================================================================
// Rental listings
// =============================================================================

/// Filter criteria for rental listing queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

#[async_trait]
pub trait RentalListingRepository: Send + Sync {
    /// Filtered page of listings, newest first, with the exact match count
    async fn search(
        &self,
        filters: RentalFilters,
        window: PageWindow,
    ) -> Result<ListResponse<RentalListing>, DatabaseError>;

    async fn find_by_id(&self, id: ListingId) -> Result<Option<RentalListing>, DatabaseError>;

    /// Most recently created listings
    async fn featured(&self, limit: u32) -> Result<Vec<RentalListing>, DatabaseError>;
}

// =============================================================================
// Office listings
// =============================================================================

/// Filter criteria for office listing queries
///
/// Serializes to the `filters.applied` object of the office search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_desks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_desks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_meeting_rooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_reception: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

#[async_trait]
pub trait OfficeListingRepository: Send + Sync {
    async fn search(
        &self,
        filters: OfficeFilters,
        window: PageWindow,
    ) -> Result<ListResponse<OfficeListing>, DatabaseError>;

    async fn find_by_id(&self, id: ListingId) -> Result<Option<OfficeListing>, DatabaseError>;

    async fn featured(&self, limit: u32) -> Result<Vec<OfficeListing>, DatabaseError>;
}

/// Hands out the listing repositories backed by one data source
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn rental_repository(&self) -> &dyn RentalListingRepository;

    fn office_repository(&self) -> &dyn OfficeListingRepository;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
