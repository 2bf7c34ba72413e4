//! Haven server
//!
//! Wires configuration, storage and the REST API together and serves them.

pub mod services;
pub mod startup;

pub use services::ServiceContainer;
pub use startup::Server;
