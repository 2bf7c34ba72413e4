use async_trait::async_trait;
use haven_api_types::{ListResponse, ListingId, ListingTable, OfficeListing, PageWindow};
use haven_interfaces::{DataSource, DatabaseError, OfficeFilters, OfficeListingRepository, OrderBy, TableQuery};
use std::sync::Arc;
use tracing::debug;

use super::{decode_rows, into_page, none_if_missing};
use crate::filters::ListingFilterBuilder;

const FILTER_COLUMNS: &[&str] = &[
    "desk_capacity",
    "meeting_rooms",
    "office_type",
    "has_reception",
    "internet_speed",
    "city",
    "state",
    "monthly_rent",
];

pub struct OfficeRepository {
    source: Arc<dyn DataSource>,
}

impl OfficeRepository {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub fn build_query(filters: &OfficeFilters, window: PageWindow) -> Result<TableQuery, DatabaseError> {
        let predicates = ListingFilterBuilder::new(FILTER_COLUMNS)
            .between(
                "desk_capacity",
                filters.min_desks.map(|v| v as f64),
                filters.max_desks.map(|v| v as f64),
            )?
            .at_least("meeting_rooms", filters.min_meeting_rooms.map(|v| v as f64))?
            .equals("office_type", filters.office_type.as_deref())?
            .equals("has_reception", filters.has_reception)?
            .contains("internet_speed", filters.internet_speed.as_deref())?
            .equals("city", filters.city.as_deref())?
            .equals("state", filters.state.as_deref())?
            .between("monthly_rent", filters.min_price, filters.max_price)?
            .build();

        let mut query = TableQuery::new(ListingTable::OfficeListings)
            .order_by(OrderBy::newest_first())
            .range(window.offset, window.limit)
            .with_exact_count();
        query.predicates = predicates;
        Ok(query)
    }
}

#[async_trait]
impl OfficeListingRepository for OfficeRepository {
    async fn search(
        &self,
        filters: OfficeFilters,
        window: PageWindow,
    ) -> Result<ListResponse<OfficeListing>, DatabaseError> {
        let query = Self::build_query(&filters, window)?;
        debug!(predicates = query.predicates.len(), page = window.page, "Searching office listings");

        let result = self.source.execute(query).await?;
        into_page(result, window)
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<OfficeListing>, DatabaseError> {
        let row = none_if_missing(self.source.fetch_by_id(ListingTable::OfficeListings, &id).await)?;
        row.map(|r| serde_json::from_value(r).map_err(DatabaseError::from))
            .transpose()
    }

    async fn featured(&self, limit: u32) -> Result<Vec<OfficeListing>, DatabaseError> {
        let query = TableQuery::new(ListingTable::OfficeListings)
            .order_by(OrderBy::newest_first())
            .limit(limit);
        let result = self.source.execute(query).await?;
        decode_rows(result.rows)
    }
}
