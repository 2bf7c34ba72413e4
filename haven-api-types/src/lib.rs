//! Shared API types for Haven
//!
//! Listing records as stored by the hosted data store, the identifier newtype
//! used for single-item lookups, and the `{ data, error, metadata }` envelope
//! every endpoint responds with. The web layer and the API client both depend
//! on these definitions so the wire shape lives in exactly one place.

pub mod domain;
pub mod envelope;
pub mod errors;
pub mod ids;
pub mod pagination;

// Re-export main types for convenience
pub use domain::{ListingTable, OfficeListing, RentalListing};
pub use envelope::{Envelope, ResponseMetadata};
pub use errors::{ApiError, ErrorCode};
pub use ids::{IdFormatError, ListingId};
pub use pagination::{ListResponse, PageWindow, PaginationMeta};
