//! Caller identity and the state cookie.
//!
//! Identity rides on two headers set by the frontend after login:
//! `Authorization: Bearer <user-id>` and `x-user-email`. The extractor turns
//! them into an explicit [`Identity`] value; handlers never consult ambient
//! state.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::config::STATE_COOKIE_NAME;
use crate::error::ServerError;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user identifier.
    pub user_id: String,
    /// The caller's email address.
    pub email: String,
}

impl Identity {
    /// Reads an identity from request headers, if both are present and
    /// non-empty.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let auth = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let user_id = auth.strip_prefix("Bearer ")?.trim();
        let email = headers.get("x-user-email")?.to_str().ok()?.trim();

        if user_id.is_empty() || email.is_empty() {
            return None;
        }

        Some(Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or(ServerError::NotAuthenticated)
    }
}

/// Reads a cookie value from the `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Builds the `Set-Cookie` value storing the OAuth state for one hour.
pub fn state_cookie(value: &str) -> String {
    format!("{STATE_COOKIE_NAME}={value}; HttpOnly; SameSite=Lax; Max-Age=3600; Path=/")
}

/// Builds the `Set-Cookie` value that clears the OAuth state.
pub fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Max-Age=0; Path=/")
}
