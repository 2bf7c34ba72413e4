pub mod account;
pub mod auth;
pub mod health;
pub mod offices;
pub mod properties;

pub use account::*;
pub use auth::*;
pub use health::*;
pub use offices::*;
pub use properties::*;
