pub mod query;
pub mod session;

pub use query::{ListingIdPath, RawQuery};
pub use session::{CurrentUser, MaybeUser};
