//! Session cookie handling and identity extractors

use crate::error::WebError;
use crate::server::AppContext;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, HeaderValue};
use encore_common::db::models::User;
use encore_common::db::sessions;
use encore_common::{Error, Result};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Pull the session token out of the Cookie header, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Set-Cookie value installing a session token
pub fn session_cookie(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token))
        .map_err(|e| Error::Internal(format!("invalid cookie value: {}", e)))
}

/// Set-Cookie value clearing the session
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; HttpOnly; Max-Age=0")
}

/// Optional identity: resolves the session cookie if present and live.
/// Never rejects for a missing or stale token.
pub struct Viewer(pub Option<User>);

#[axum::async_trait]
impl FromRequestParts<AppContext> for Viewer {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> std::result::Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(Viewer(None));
        };
        let user = sessions::user_for_token(&ctx.db, &token).await?;
        Ok(Viewer(user))
    }
}

/// Required identity: rejects with a login redirect that preserves the
/// original destination
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> std::result::Result<Self, Self::Rejection> {
        let next = parts.uri.path().to_string();

        let Some(token) = session_token(&parts.headers) else {
            return Err(Error::Unauthenticated { next }.into());
        };
        match sessions::user_for_token(&ctx.db, &token).await? {
            Some(user) => Ok(AuthUser { user, token }),
            None => Err(Error::Unauthenticated { next }.into()),
        }
    }
}

impl Viewer {
    /// The viewer's user id, if logged in
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_session_token_from_cookie_header() {
        let headers = headers_with_cookie("session=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn finds_session_among_multiple_cookies() {
        let headers = headers_with_cookie("theme=dark; session=tok; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("tok"));
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn unrelated_cookies_yield_none() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }
}
