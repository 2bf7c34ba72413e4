//! Hosted backend (data store + auth provider) configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Where listing data comes from
    #[serde(default)]
    pub mode: BackendMode,

    /// Project URL of the hosted backend, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key sent as `apikey` and bearer token
    #[serde(default)]
    pub anon_key: String,

    /// Timeout for a single remote call
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Hosted store over HTTP
    Remote,
    /// Seeded in-process store for local development and tests
    #[default]
    Memory,
}

impl FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(BackendMode::Remote),
            "memory" => Ok(BackendMode::Memory),
            _ => Err(format!("Invalid backend mode: {}", s)),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            url: String::new(),
            anon_key: String::new(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl Validatable for BackendConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;

        if self.mode == BackendMode::Remote {
            validate_url(&self.url, "url", self.domain_name())?;
            validate_required_string(&self.anon_key, "anon_key", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "backend"
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("haven/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_mode_needs_no_url() {
        assert!(BackendConfig::default().validate().is_ok());
    }

    #[test]
    fn test_remote_mode_requires_url_and_key() {
        let mut config = BackendConfig {
            mode: BackendMode::Remote,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.url = "https://project.supabase.co/".to_string();
        assert!(config.validate().is_err());

        config.anon_key = "public-anon-key".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://project.supabase.co");
    }
}
