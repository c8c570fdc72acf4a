//! Inoreader content API client.
//!
//! A thin HTTP client for the stream-contents endpoint, handling
//! authentication, request building, and response parsing. Normalization of
//! the returned items happens elsewhere.

use std::time::Duration;

use tracing::debug;

use crate::error::{FeedError, FeedResult};
use crate::raw_item::StreamResponse;

/// The reading-list stream identifier.
const READING_LIST_STREAM: &str = "user/-/state/com.google/reading-list";

/// How many items to request per fetch.
const DEFAULT_ITEM_COUNT: usize = 20;

/// Client for the Inoreader stream-contents API.
#[derive(Debug)]
pub struct StreamClient {
    http_client: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl StreamClient {
    /// Creates a client against the given API base with a bearer token.
    pub fn new(
        api_base: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> FeedResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                FeedError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            api_base: api_base.into(),
            access_token: access_token.into(),
        })
    }

    /// Updates the access token (after refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Fetches the user's reading-list stream.
    pub async fn fetch_reading_list(&self) -> FeedResult<StreamResponse> {
        let url = format!(
            "{}/stream/contents/{}",
            self.api_base,
            urlencoding::encode(READING_LIST_STREAM)
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("n", DEFAULT_ITEM_COUNT.to_string())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::upstream("request timeout")
                } else if e.is_connect() {
                    FeedError::upstream(format!("connection failed: {e}"))
                } else {
                    FeedError::upstream(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FeedError::not_authenticated(
                "access token expired or invalid",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::upstream(format!(
                "stream API error ({status}): {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::upstream(format!("failed to read response: {e}")))?;

        let stream: StreamResponse = serde_json::from_str(&body)
            .map_err(|e| FeedError::invalid_response(format!("invalid stream response: {e}")))?;

        debug!(items = stream.items.len(), "fetched reading list");
        Ok(stream)
    }
}
