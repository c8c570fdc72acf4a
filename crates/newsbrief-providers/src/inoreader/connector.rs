//! Per-user connection management for the Inoreader provider.
//!
//! The connector ties the OAuth client and the token store together. It owns
//! the refresh-before-use policy: any access token handed out is guaranteed
//! to be outside the expiry safety margin at the moment of the check.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{FeedError, FeedResult};
use crate::store::TokenStore;
use crate::tokens::{TokenRecord, TokenSet};

use super::config::InoreaderConfig;
use super::oauth::{AuthRequest, OAuthClient};

/// Manages a user's connection to the feed provider.
pub struct FeedConnector {
    config: InoreaderConfig,
    oauth_client: OAuthClient,
    store: Arc<dyn TokenStore>,
    /// Serializes refreshes so concurrent callers do not race the provider.
    refresh_lock: Mutex<()>,
}

impl FeedConnector {
    /// Creates a connector from the provider configuration and a token store.
    pub fn new(config: InoreaderConfig, store: Arc<dyn TokenStore>) -> FeedResult<Self> {
        config.validate().map_err(FeedError::configuration)?;
        let oauth_client = OAuthClient::new(config.clone())?;

        Ok(Self {
            config,
            oauth_client,
            store,
            refresh_lock: Mutex::new(()),
        })
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &InoreaderConfig {
        &self.config
    }

    /// Starts the authorization flow for a user.
    pub fn initiate_auth(&self, user_id: &str) -> AuthRequest {
        self.oauth_client.initiate_auth(user_id)
    }

    /// Exchanges an authorization code without persisting the result.
    pub async fn exchange_code(&self, code: &str) -> FeedResult<TokenSet> {
        self.oauth_client.exchange_code(code).await
    }

    /// Persists a token set for a user, replacing any existing record.
    pub fn store_tokens(&self, user_id: &str, tokens: TokenSet) -> FeedResult<()> {
        self.store.upsert(TokenRecord::new(user_id, tokens))?;
        info!(user_id, "stored feed provider tokens");
        Ok(())
    }

    /// Returns a usable access token for a user, or `None`.
    ///
    /// Never errors: a missing record or a failed refresh both yield `None`
    /// so read paths can degrade to fixtures. Tokens inside the expiry
    /// margin are refreshed before being returned.
    pub async fn access_token(&self, user_id: &str) -> Option<String> {
        let record = match self.store.get(user_id) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(user_id, error = %e, "token lookup failed");
                return None;
            }
        };

        if !record.needs_refresh(Utc::now()) {
            return Some(record.access_token);
        }

        match self.refresh(user_id).await {
            Ok(record) => Some(record.access_token),
            Err(e) => {
                warn!(user_id, error = %e, "token refresh failed");
                None
            }
        }
    }

    /// Refreshes a user's tokens and persists the result.
    ///
    /// The returned record carries the new access token. Concurrent calls
    /// for any user are serialized; a caller that waited re-checks the
    /// store and skips the provider round trip when another refresh
    /// already landed.
    pub async fn refresh(&self, user_id: &str) -> FeedResult<TokenRecord> {
        let _guard = self.refresh_lock.lock().await;

        let mut record = self
            .store
            .get(user_id)?
            .ok_or_else(|| FeedError::not_authenticated("no tokens on file"))?;

        // Another caller may have refreshed while we waited for the lock
        if !record.needs_refresh(Utc::now()) {
            return Ok(record);
        }

        let refresh_token = record
            .refresh_token
            .clone()
            .ok_or_else(|| FeedError::no_refresh_token("re-authorization required"))?;

        debug!(user_id, "refreshing access token");
        let tokens = self.oauth_client.refresh(&refresh_token).await?;

        record.apply_refresh(tokens);
        self.store.upsert(record.clone())?;

        Ok(record)
    }

    /// Returns true when the user has tokens on file.
    pub fn is_connected(&self, user_id: &str) -> bool {
        matches!(self.store.get(user_id), Ok(Some(_)))
    }

    /// Removes the user's tokens. Succeeds when nothing was stored.
    pub fn disconnect(&self, user_id: &str) -> FeedResult<()> {
        self.store.delete(user_id)?;
        info!(user_id, "disconnected from feed provider");
        Ok(())
    }
}
