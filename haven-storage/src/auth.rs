//! Client for the hosted auth service (`{url}/auth/v1`)

use async_trait::async_trait;
use haven_config::BackendConfig;
use haven_interfaces::{AuthError, AuthSession, AuthUser, IdentityProvider};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::{StorageError, StorageResult};

pub struct HostedAuthClient {
    client: Client,
    auth_url: Url,
}

impl HostedAuthClient {
    pub fn new(config: &BackendConfig) -> StorageResult<Self> {
        let auth_url = Url::parse(&format!("{}/auth/v1/", config.base_url()))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| StorageError::ConfigError(format!("anon_key is not a valid header value: {e}")))?;
        headers.insert("apikey", key);

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, auth_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.auth_url.join(path).map_err(|e| AuthError::Provider {
            message: e.to_string(),
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AuthError> {
        request.send().await.map_err(|e| {
            warn!("Auth provider request failed: {}", e);
            AuthError::Connection { message: e.to_string() }
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    response.json().await.map_err(|e| AuthError::Provider {
        message: e.to_string(),
    })
}

async fn rejection_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or_else(|| format!("auth provider returned {status}"))
}

#[async_trait]
impl IdentityProvider for HostedAuthClient {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let request = self.client.get(self.endpoint("user")?).bearer_auth(access_token);
        let response = self.send(request).await?;

        match response.status().as_u16() {
            200..=299 => decode(response).await,
            401 | 403 => Err(AuthError::InvalidSession),
            _ => Err(AuthError::Provider {
                message: rejection_message(response).await,
            }),
        }
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");

        let request = self.client.post(url).json(&json!({ "auth_code": code }));
        let response = self.send(request).await?;

        if response.status().is_success() {
            debug!("Exchanged authorization code for session");
            decode(response).await
        } else if response.status().is_client_error() {
            Err(AuthError::CodeExchange {
                message: rejection_message(response).await,
            })
        } else {
            Err(AuthError::Provider {
                message: rejection_message(response).await,
            })
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");

        let request = self.client.post(url).json(&json!({ "refresh_token": refresh_token }));
        let response = self.send(request).await?;

        if response.status().is_success() {
            decode(response).await
        } else if response.status().is_client_error() {
            Err(AuthError::InvalidSession)
        } else {
            Err(AuthError::Provider {
                message: rejection_message(response).await,
            })
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let request = self.client.post(self.endpoint("logout")?).bearer_auth(access_token);
        let response = self.send(request).await?;

        match response.status().as_u16() {
            200..=299 => Ok(()),
            // Already revoked or expired
            401 | 403 | 404 => Ok(()),
            _ => Err(AuthError::Provider {
                message: rejection_message(response).await,
            }),
        }
    }
}

/// Identity provider for running without a hosted backend
///
/// Every session is treated as invalid, so all visitors are anonymous and
/// account pages redirect to the login page.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIdentityProvider;

#[async_trait]
impl IdentityProvider for OfflineIdentityProvider {
    async fn get_user(&self, _access_token: &str) -> Result<AuthUser, AuthError> {
        Err(AuthError::InvalidSession)
    }

    async fn exchange_code_for_session(&self, _code: &str) -> Result<AuthSession, AuthError> {
        Err(AuthError::CodeExchange {
            message: "sign-in is unavailable without a hosted backend".to_string(),
        })
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<AuthSession, AuthError> {
        Err(AuthError::InvalidSession)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}
