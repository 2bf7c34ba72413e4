//! Session adapter and account guard
//!
//! Reads the session cookies, resolves the signed-in user through the
//! [`IdentityProvider`], and refreshes an expired access token when a refresh
//! token is present. Refreshed (or cleared) cookies are attached to whatever
//! response goes back. The resolved [`AuthUser`] is inserted as a request
//! extension for [`crate::CurrentUser`] and [`crate::MaybeUser`].
//!
//! Requests under a protected path prefix without a user are redirected with
//! `303 See Other` to the login page. Matching is by whole path segments, so
//! `/account` guards `/account/settings` but not `/accounting`.

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use haven_config::AuthConfig;
use haven_interfaces::{AuthError, AuthSession, AuthUser, IdentityProvider};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SessionState {
    pub provider: Arc<dyn IdentityProvider>,
    pub config: Arc<AuthConfig>,
}

impl SessionState {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: AuthConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Whether `path` needs a signed-in user
    pub fn is_guarded(&self, path: &str) -> bool {
        let matches = |prefix: &String| path_has_prefix(path, prefix);
        !self.config.public_paths.iter().any(matches) && self.config.protected_paths.iter().any(matches)
    }
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Value of a named cookie across all `Cookie` headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

fn cookie(name: &str, value: &str, max_age: u64, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| warn!("Dropping unrepresentable {} cookie: {}", name, e))
        .ok()
}

/// `Set-Cookie` values that store a freshly issued session
pub fn session_cookies(config: &AuthConfig, session: &AuthSession) -> Vec<HeaderValue> {
    [
        cookie(
            &config.access_cookie,
            &session.access_token,
            session.expires_in,
            config.secure_cookies,
        ),
        cookie(
            &config.refresh_cookie,
            &session.refresh_token,
            config.refresh_max_age,
            config.secure_cookies,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// `Set-Cookie` values that remove both session cookies
pub fn clear_cookies(config: &AuthConfig) -> Vec<HeaderValue> {
    [&config.access_cookie, &config.refresh_cookie]
        .into_iter()
        .filter_map(|name| cookie(name, "", 0, config.secure_cookies))
        .collect()
}

/// Outcome of resolving the request's cookies
#[derive(Default)]
struct Resolution {
    user: Option<AuthUser>,
    set_cookies: Vec<HeaderValue>,
}

impl Resolution {
    fn anonymous() -> Self {
        Self::default()
    }

    fn cleared(config: &AuthConfig) -> Self {
        Self {
            user: None,
            set_cookies: clear_cookies(config),
        }
    }
}

async fn resolve(state: &SessionState, headers: &HeaderMap) -> Resolution {
    let config = &state.config;
    let access = cookie_value(headers, &config.access_cookie);
    let refresh = cookie_value(headers, &config.refresh_cookie);

    if let Some(access) = access.as_deref() {
        match state.provider.get_user(access).await {
            Ok(user) => {
                return Resolution {
                    user: Some(user),
                    set_cookies: Vec::new(),
                }
            }
            Err(AuthError::InvalidSession) => debug!("Access token rejected"),
            Err(e) => {
                warn!("Could not resolve session, continuing anonymously: {}", e);
                return Resolution::anonymous();
            }
        }
    }

    let Some(refresh) = refresh else {
        return if access.is_some() {
            Resolution::cleared(config)
        } else {
            Resolution::anonymous()
        };
    };

    match state.provider.refresh_session(&refresh).await {
        Ok(session) => {
            debug!(user_id = %session.user.id, "Refreshed session");
            Resolution {
                set_cookies: session_cookies(config, &session),
                user: Some(session.user),
            }
        }
        Err(AuthError::InvalidSession) => Resolution::cleared(config),
        Err(e) => {
            warn!("Session refresh failed, continuing anonymously: {}", e);
            Resolution::anonymous()
        }
    }
}

fn login_redirect(config: &AuthConfig, query: Option<&str>) -> Response {
    let location = match query {
        Some(q) if !q.is_empty() => format!("{}?{}", config.login_path, q),
        _ => config.login_path.clone(),
    };

    match HeaderValue::from_str(&location) {
        Ok(location) => (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response(),
        Err(_) => (
            StatusCode::SEE_OTHER,
            [(LOCATION, HeaderValue::from_static("/login"))],
        )
            .into_response(),
    }
}

pub async fn session_middleware(State(state): State<SessionState>, mut request: Request, next: Next) -> Response {
    let resolution = resolve(&state, request.headers()).await;

    let mut response = if resolution.user.is_none() && state.is_guarded(request.uri().path()) {
        debug!(path = %request.uri().path(), "Redirecting anonymous request to login");
        login_redirect(&state.config, request.uri().query())
    } else {
        if let Some(user) = resolution.user {
            request.extensions_mut().insert(user);
        }
        next.run(request).await
    };

    for value in resolution.set_cookies {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}
