//! Token types shared between the OAuth client and the token store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access tokens expiring within this many seconds are refreshed before use.
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// A token set as returned by the provider's token endpoint.
///
/// Not yet tied to a user; the connector turns it into a [`TokenRecord`]
/// when persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    /// Bearer token for API requests.
    pub access_token: String,

    /// Token for obtaining new access tokens. Refresh responses may omit it.
    pub refresh_token: Option<String>,

    /// Absolute expiry instant, computed from the response's `expires_in`.
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Builds a token set from raw token-endpoint response fields.
    pub fn from_response(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }
}

/// A user's persisted token set.
///
/// One record per user, keyed by `user_id`. Created on the first successful
/// code exchange, updated in place on refresh, deleted on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The owning user.
    pub user_id: String,

    /// Bearer token for API requests.
    pub access_token: String,

    /// Token for obtaining new access tokens.
    pub refresh_token: Option<String>,

    /// When the access token expires.
    pub expires_at: DateTime<Utc>,

    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Creates a record for a user from a freshly obtained token set.
    pub fn new(user_id: impl Into<String>, tokens: TokenSet) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_at,
            created_at: Utc::now(),
        }
    }

    /// Returns true when the access token is expired or inside the refresh
    /// safety margin.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) >= self.expires_at
    }

    /// Applies a refreshed token set, keeping the previous refresh token
    /// when the provider omitted a new one.
    pub fn apply_refresh(&mut self, tokens: TokenSet) {
        self.access_token = tokens.access_token;
        if tokens.refresh_token.is_some() {
            self.refresh_token = tokens.refresh_token;
        }
        self.expires_at = tokens.expires_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_in_secs: i64) -> TokenRecord {
        TokenRecord::new(
            "u1",
            TokenSet::from_response("access", Some("refresh".to_string()), expires_in_secs),
        )
    }

    #[test]
    fn fresh_token_does_not_need_refresh() {
        let record = record(3600);
        assert!(!record.needs_refresh(Utc::now()));
    }

    #[test]
    fn token_inside_margin_needs_refresh() {
        let record = record(REFRESH_MARGIN_SECS - 10);
        assert!(record.needs_refresh(Utc::now()));
    }

    #[test]
    fn expired_token_needs_refresh() {
        let record = record(-100);
        assert!(record.needs_refresh(Utc::now()));
    }

    #[test]
    fn margin_boundary_is_inclusive() {
        let now = Utc::now();
        let mut record = record(3600);
        record.expires_at = now + Duration::seconds(REFRESH_MARGIN_SECS);
        assert!(record.needs_refresh(now));
        record.expires_at = now + Duration::seconds(REFRESH_MARGIN_SECS + 1);
        assert!(!record.needs_refresh(now));
    }

    #[test]
    fn refresh_keeps_old_refresh_token_when_omitted() {
        let mut record = record(10);
        record.apply_refresh(TokenSet::from_response("new-access", None, 3600));
        assert_eq!(record.access_token, "new-access");
        assert_eq!(record.refresh_token.as_deref(), Some("refresh"));
        assert!(!record.needs_refresh(Utc::now()));
    }

    #[test]
    fn refresh_replaces_refresh_token_when_present() {
        let mut record = record(10);
        record.apply_refresh(TokenSet::from_response(
            "new-access",
            Some("new-refresh".to_string()),
            3600,
        ));
        assert_eq!(record.refresh_token.as_deref(), Some("new-refresh"));
    }

    #[test]
    fn expires_at_reflects_expires_in() {
        let before = Utc::now();
        let set = TokenSet::from_response("a", None, 3600);
        let after = Utc::now();
        assert!(set.expires_at >= before + Duration::seconds(3600));
        assert!(set.expires_at <= after + Duration::seconds(3600));
    }
}
