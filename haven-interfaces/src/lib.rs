//! # Haven Interfaces
//!
//! Traits shared across the Haven workspace so that handlers, storage and the
//! server binary can be wired together by dependency injection.
//!
//! ## Main Interfaces
//!
//! - [`DataSource`] - remote tabular store that executes [`TableQuery`]s
//! - [`RentalListingRepository`] / [`OfficeListingRepository`] - listing reads
//! - [`IdentityProvider`] - hosted authentication service

pub mod database;
pub mod identity;
pub mod repositories;

pub use database::{
    DataSource, DatabaseError, FilterOp, FilterValue, OrderBy, Predicate, QueryResult, SortDirection, TableQuery,
};
pub use identity::{AuthError, AuthSession, AuthUser, IdentityProvider};
pub use repositories::{
    OfficeFilters, OfficeListingRepository, RentalFilters, RentalListingRepository, RepositoryFactory,
};
