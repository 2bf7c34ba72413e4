//! Domain-driven configuration for the Haven server
//!
//! Configuration is split by functional domain (server, backend, auth,
//! logging). Each domain has serde defaults and a [`Validatable`] impl;
//! [`ConfigLoader`] reads YAML and applies `HAVEN_*` environment overrides.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

pub use domains::{
    auth::AuthConfig,
    backend::{BackendConfig, BackendMode},
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::{CorsConfig, Environment, ServerConfig},
    HavenConfig,
};

pub use domains::utils::serde_duration;
