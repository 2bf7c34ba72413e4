//! Configuration loading and environment variable handling

use crate::domains::HavenConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: "HAVEN".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<HavenConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: HavenConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<HavenConfig> {
        let mut config = HavenConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<HavenConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut HavenConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_backend_overrides(&mut config.backend)?;
        self.apply_auth_overrides(&mut config.auth)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SERVER_PORT: {}", e)))?;
        }

        if let Ok(environment) = self.get_env_var("ENVIRONMENT") {
            config.environment = FromStr::from_str(&environment).map_err(ConfigError::EnvError)?;
        }

        if let Ok(dir) = self.get_env_var("STATIC_DIR") {
            config.static_dir = Some(dir.into());
        }

        Ok(())
    }

    fn apply_backend_overrides(&self, config: &mut crate::domains::backend::BackendConfig) -> ConfigResult<()> {
        if let Ok(mode) = self.get_env_var("BACKEND_MODE") {
            config.mode = FromStr::from_str(&mode).map_err(ConfigError::EnvError)?;
        }

        if let Ok(url) = self.get_env_var("BACKEND_URL") {
            config.url = url;
        }

        if let Ok(key) = self.get_env_var("BACKEND_ANON_KEY") {
            config.anon_key = key;
        }

        if let Ok(timeout) = self.get_env_var("BACKEND_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid BACKEND_TIMEOUT: {}", e)))?;
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(())
    }

    fn apply_auth_overrides(&self, config: &mut crate::domains::auth::AuthConfig) -> ConfigResult<()> {
        if let Ok(login) = self.get_env_var("AUTH_LOGIN_PATH") {
            config.login_path = login;
        }

        if let Ok(paths) = self.get_env_var("AUTH_PROTECTED_PATHS") {
            config.protected_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(secure) = self.get_env_var("AUTH_SECURE_COOKIES") {
            config.secure_cookies = secure
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid AUTH_SECURE_COOKIES: {}", e)))?;
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.level = FromStr::from_str(&level).map_err(ConfigError::EnvError)?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = FromStr::from_str(&format).map_err(ConfigError::EnvError)?;
        }

        Ok(())
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
