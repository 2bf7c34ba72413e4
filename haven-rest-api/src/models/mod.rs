pub mod common;
pub mod listings;

pub use common::{HealthResponse, ReadinessResponse};
pub use listings::{FeaturedQuery, OfficeSearchQuery, RentalSearchQuery};
