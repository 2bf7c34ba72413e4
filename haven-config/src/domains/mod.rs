//! Domain-specific configuration modules

pub mod auth;
pub mod backend;
pub mod logging;
pub mod server;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Complete Haven configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HavenConfig {
    #[serde(default)]
    pub server: server::ServerConfig,

    #[serde(default)]
    pub backend: backend::BackendConfig,

    #[serde(default)]
    pub auth: auth::AuthConfig,

    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl HavenConfig {
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.backend.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Render as YAML, e.g. for `--print-config`
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
