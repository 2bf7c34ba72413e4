//! Listing repositories over a [`DataSource`]

mod office;
mod rental;

pub use office::OfficeRepository;
pub use rental::RentalRepository;

use async_trait::async_trait;
use haven_api_types::{ListResponse, PageWindow, PaginationMeta};
use haven_interfaces::{
    DataSource, DatabaseError, OfficeListingRepository, QueryResult, RentalListingRepository, RepositoryFactory,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Builds both listing repositories on one shared data source
pub struct DataSourceRepositoryFactory {
    source: Arc<dyn DataSource>,
    rentals: RentalRepository,
    offices: OfficeRepository,
}

impl DataSourceRepositoryFactory {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            rentals: RentalRepository::new(source.clone()),
            offices: OfficeRepository::new(source.clone()),
            source,
        }
    }
}

#[async_trait]
impl RepositoryFactory for DataSourceRepositoryFactory {
    fn rental_repository(&self) -> &dyn RentalListingRepository {
        &self.rentals
    }

    fn office_repository(&self) -> &dyn OfficeListingRepository {
        &self.offices
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.source.health_check().await
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, DatabaseError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(DatabaseError::from))
        .collect()
}

fn into_page<T: DeserializeOwned>(result: QueryResult, window: PageWindow) -> Result<ListResponse<T>, DatabaseError> {
    let fallback = window.offset + result.rows.len() as u64;
    let total = result.total.unwrap_or(fallback);
    let items = decode_rows(result.rows)?;
    Ok(ListResponse::new(items, PaginationMeta::compute(total, window)))
}

fn none_if_missing<T>(result: Result<T, DatabaseError>) -> Result<Option<T>, DatabaseError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
