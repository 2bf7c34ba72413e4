use async_trait::async_trait;
use haven_api_types::{ListResponse, ListingId, ListingTable, PageWindow, RentalListing};
use haven_interfaces::{DataSource, DatabaseError, OrderBy, RentalFilters, RentalListingRepository, TableQuery};
use std::sync::Arc;
use tracing::debug;

use super::{decode_rows, into_page, none_if_missing};
use crate::filters::ListingFilterBuilder;

const FILTER_COLUMNS: &[&str] = &["city", "monthly_rent", "property_type"];

pub struct RentalRepository {
    source: Arc<dyn DataSource>,
}

impl RentalRepository {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Predicates for a rental search; absent criteria add none
    pub fn build_query(filters: &RentalFilters, window: PageWindow) -> Result<TableQuery, DatabaseError> {
        let predicates = ListingFilterBuilder::new(FILTER_COLUMNS)
            .equals("city", filters.city.as_deref())?
            .between("monthly_rent", filters.min_price, filters.max_price)?
            .equals("property_type", filters.property_type.as_deref())?
            .build();

        let mut query = TableQuery::new(ListingTable::RentalListings)
            .order_by(OrderBy::newest_first())
            .range(window.offset, window.limit)
            .with_exact_count();
        query.predicates = predicates;
        Ok(query)
    }
}

#[async_trait]
impl RentalListingRepository for RentalRepository {
    async fn search(
        &self,
        filters: RentalFilters,
        window: PageWindow,
    ) -> Result<ListResponse<RentalListing>, DatabaseError> {
        let query = Self::build_query(&filters, window)?;
        debug!(predicates = query.predicates.len(), offset = window.offset, "Searching rental listings");

        let result = self.source.execute(query).await?;
        into_page(result, window)
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<RentalListing>, DatabaseError> {
        let row = none_if_missing(self.source.fetch_by_id(ListingTable::RentalListings, &id).await)?;
        row.map(|r| serde_json::from_value(r).map_err(DatabaseError::from))
            .transpose()
    }

    async fn featured(&self, limit: u32) -> Result<Vec<RentalListing>, DatabaseError> {
        let query = TableQuery::new(ListingTable::RentalListings)
            .order_by(OrderBy::newest_first())
            .limit(limit);
        let result = self.source.execute(query).await?;
        decode_rows(result.rows)
    }
}
