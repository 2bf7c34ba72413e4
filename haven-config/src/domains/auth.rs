//! Session cookie and account guard configuration

use crate::error::ConfigResult;
use crate::validation::{validate_path, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path prefixes that require a signed-in user
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,

    /// Path prefixes that are never guarded, even if nested under a protected one
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,

    /// Where unauthenticated users are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_access_cookie")]
    pub access_cookie: String,

    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie: String,

    /// Mark session cookies `Secure`
    #[serde(default = "crate::domains::utils::default_false")]
    pub secure_cookies: bool,

    /// Refresh cookie lifetime in seconds
    #[serde(default = "default_refresh_max_age")]
    pub refresh_max_age: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            protected_paths: default_protected_paths(),
            public_paths: default_public_paths(),
            login_path: default_login_path(),
            access_cookie: default_access_cookie(),
            refresh_cookie: default_refresh_cookie(),
            secure_cookies: false,
            refresh_max_age: default_refresh_max_age(),
        }
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_path(&self.login_path, "login_path", self.domain_name())?;
        validate_required_string(&self.access_cookie, "access_cookie", self.domain_name())?;
        validate_required_string(&self.refresh_cookie, "refresh_cookie", self.domain_name())?;

        for path in self.protected_paths.iter().chain(&self.public_paths) {
            validate_path(path, "protected_paths/public_paths", self.domain_name())?;
        }

        if self
            .protected_paths
            .iter()
            .any(|p| self.login_path.starts_with(p.as_str()))
        {
            return Err(self.validation_error("login_path cannot be under a protected path"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}

fn default_protected_paths() -> Vec<String> {
    ["/account", "/saved-homes", "/saved-searches", "/dashboard", "/admin"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_public_paths() -> Vec<String> {
    vec!["/login".to_string(), "/auth".to_string()]
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_access_cookie() -> String {
    "sb-access-token".to_string()
}

fn default_refresh_cookie() -> String {
    "sb-refresh-token".to_string()
}

fn default_refresh_max_age() -> u64 {
    60 * 60 * 24 * 30
}
