//! Session endpoints backed by the hosted auth provider

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use haven_web::{clear_cookies, cookie_value, session_cookies, RawQuery};
use tracing::{info, warn};

use crate::context::AuthContext;

/// Redirect target after sign-in; only same-origin absolute paths are honoured
///
/// The path must also be usable as a `Location` header as-is.
pub fn safe_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control)
                && HeaderValue::from_str(path).is_ok() =>
        {
            path
        }
        _ => "/",
    }
}

/// `GET /auth/callback?code&next`
///
/// Exchanges the authorization code for a session, stores it in cookies and
/// redirects to `next`. A missing or rejected code still redirects, without
/// a session.
pub async fn auth_callback(State(ctx): State<AuthContext>, RawQuery(params): RawQuery) -> Response {
    let target = safe_redirect_target(params.get("next").map(String::as_str)).to_string();

    let cookies = match params.get("code").map(|c| c.trim()).filter(|c| !c.is_empty()) {
        Some(code) => match ctx.provider.exchange_code_for_session(code).await {
            Ok(session) => {
                info!(user_id = %session.user.id, "Signed in via auth callback");
                session_cookies(&ctx.config, &session)
            }
            Err(e) => {
                warn!("Auth code exchange failed: {}", e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let mut response = Redirect::to(&target).into_response();
    for cookie in cookies {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

/// `POST /auth/signout`
///
/// Revokes the session at the provider when one is present and always clears
/// the session cookies.
pub async fn sign_out(State(ctx): State<AuthContext>, headers: HeaderMap) -> Response {
    if let Some(access) = cookie_value(&headers, &ctx.config.access_cookie) {
        match ctx.provider.sign_out(&access).await {
            Ok(()) => info!("Signed out"),
            Err(e) => warn!("Could not revoke session at auth provider: {}", e),
        }
    }

    let mut response = Redirect::to("/").into_response();
    for cookie in clear_cookies(&ctx.config) {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target() {
        assert_eq!(safe_redirect_target(None), "/");
        assert_eq!(safe_redirect_target(Some("/account")), "/account");
        assert_eq!(safe_redirect_target(Some("/saved-homes?sort=new")), "/saved-homes?sort=new");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/\\evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/a\nb")), "/");
        assert_eq!(safe_redirect_target(Some("/a\tb")), "/");
        assert_eq!(safe_redirect_target(Some("/caf\u{e9}")), "/");
    }
}
