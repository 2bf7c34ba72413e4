//! Logging setup for Haven
//!
//! All crates log through `tracing`; this crate only installs the global
//! subscriber, driven by [`haven_config::LoggingConfig`].

mod init;

pub use init::{init_logging_from_config, init_simple_tracing, init_test_tracing};
