//! The feed adapter.
//!
//! Turns provider stream responses into normalized articles and absorbs
//! every failure along the way. Callers always get a renderable list: an
//! unauthenticated user, a provider outage, or a malformed body all degrade
//! to the fixture set instead of an error.

use std::sync::Arc;

use tracing::{debug, warn};

use newsbrief_core::Article;

use crate::fixtures::fallback_articles;
use crate::inoreader::{FeedConnector, StreamClient};
use crate::normalize::normalize_items;

/// Fetches and normalizes articles for users.
pub struct FeedAdapter {
    connector: Arc<FeedConnector>,
}

impl FeedAdapter {
    /// Creates an adapter over a connector.
    pub fn new(connector: Arc<FeedConnector>) -> Self {
        Self { connector }
    }

    /// Returns the underlying connector.
    pub fn connector(&self) -> &Arc<FeedConnector> {
        &self.connector
    }

    /// Returns articles for a user, never failing.
    ///
    /// Users without a usable access token get the fixture set, as does
    /// any request the provider cannot serve.
    pub async fn fetch_articles(&self, user_id: &str) -> Vec<Article> {
        let Some(access_token) = self.connector.access_token(user_id).await else {
            debug!(user_id, "no usable access token, serving fixtures");
            return fallback_articles();
        };

        let config = self.connector.config();
        let client = match StreamClient::new(&config.api_base, access_token, config.timeout) {
            Ok(client) => client,
            Err(e) => {
                warn!(user_id, error = %e, "failed to build stream client, serving fixtures");
                return fallback_articles();
            }
        };

        match client.fetch_reading_list().await {
            Ok(stream) => {
                debug!(user_id, items = stream.items.len(), "normalizing stream items");
                normalize_items(&stream.items)
            }
            Err(e) => {
                warn!(user_id, error = %e, "feed fetch failed, serving fixtures");
                fallback_articles()
            }
        }
    }
}
