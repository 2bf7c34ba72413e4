//! Listing storage for Haven
//!
//! Repositories translate validated filter criteria into [`TableQuery`]s and
//! decode the returned rows. Two [`DataSource`] implementations back them:
//!
//! - [`RestDataSource`] talks to the hosted store's PostgREST endpoint
//! - [`InMemoryDataSource`] evaluates the same queries over seeded rows
//!
//! [`HostedAuthClient`] is the [`IdentityProvider`] for the same backend.
//!
//! [`TableQuery`]: haven_interfaces::TableQuery
//! [`DataSource`]: haven_interfaces::DataSource
//! [`IdentityProvider`]: haven_interfaces::IdentityProvider

pub mod auth;
pub mod error;
pub mod filters;
pub mod fixtures;
pub mod memory;
pub mod repositories;
pub mod rest;

#[cfg(feature = "testing")]
pub mod testing;

pub use auth::{HostedAuthClient, OfflineIdentityProvider};
pub use error::{StorageError, StorageResult};
pub use filters::ListingFilterBuilder;
pub use memory::InMemoryDataSource;
pub use repositories::{DataSourceRepositoryFactory, OfficeRepository, RentalRepository};
pub use rest::RestDataSource;
