//! OAuth 2.0 authorization-code flow against Inoreader.
//!
//! This module implements the server-side half of the flow: building the
//! authorization URL with a CSRF state token, exchanging the authorization
//! code for tokens, and refreshing expired access tokens. The HTTP layer
//! receives the provider's redirect; persistence is the connector's job.
//!
//! # Security
//!
//! - The state parameter carries a random CSRF token; the callback rejects
//!   any state that does not match the value stored at initiation
//! - Raw provider error bodies go to logs only, never to end users

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FeedError, FeedResult};
use crate::tokens::TokenSet;

use super::config::InoreaderConfig;

/// Length of the random CSRF token in bytes, before base64 encoding.
const CSRF_TOKEN_LENGTH: usize = 16;

/// The decoded contents of the OAuth `state` parameter.
///
/// Encoded as base64url(JSON) so the callback can recover the initiating
/// user without a server-side session. It is tamper-evident through the
/// exact-match check against the stored cookie, not a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    /// Random CSRF token, unique per initiation.
    pub csrf: String,

    /// The user who started the flow.
    pub user_id: String,
}

impl OAuthState {
    /// Creates a state with a fresh random CSRF token.
    pub fn new(user_id: impl Into<String>) -> Self {
        let mut rng = rand::rng();
        let bytes: Vec<u8> = (0..CSRF_TOKEN_LENGTH).map(|_| rng.random()).collect();

        Self {
            csrf: URL_SAFE_NO_PAD.encode(&bytes),
            user_id: user_id.into(),
        }
    }

    /// Encodes the state for the `state` query parameter.
    pub fn encode(&self) -> String {
        // Serialization of two string fields cannot fail
        let json = serde_json::to_string(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a `state` query parameter value.
    pub fn decode(encoded: &str) -> FeedResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| FeedError::invalid_response(format!("malformed state parameter: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FeedError::invalid_response(format!("malformed state payload: {e}")))
    }
}

/// An initiated authorization request.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// The provider's consent page URL to send the user to.
    pub auth_url: String,

    /// The encoded state, to be stored in the caller's cookie and matched
    /// on callback.
    pub state: String,
}

/// OAuth client for the Inoreader token endpoints.
#[derive(Debug)]
pub struct OAuthClient {
    config: InoreaderConfig,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a client from the provider configuration.
    pub fn new(config: InoreaderConfig) -> FeedResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                FeedError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Starts the authorization flow for a user.
    ///
    /// Returns the consent URL and the encoded state. The caller is
    /// responsible for storing the state so the callback can verify it.
    pub fn initiate_auth(&self, user_id: &str) -> AuthRequest {
        let state = OAuthState::new(user_id).encode();

        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.config.auth_url,
            urlencoding::encode(&self.config.credentials.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scope),
            urlencoding::encode(&state),
        );

        debug!(user_id, "initiated authorization flow");
        AuthRequest { auth_url, state }
    }

    /// Exchanges an authorization code for a token set.
    ///
    /// Does not persist anything; the caller decides what to do with the
    /// tokens.
    pub async fn exchange_code(&self, code: &str) -> FeedResult<TokenSet> {
        let params = [
            ("code", code),
            ("client_id", self.config.credentials.client_id.as_str()),
            (
                "client_secret",
                self.config.credentials.client_secret.as_str(),
            ),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FeedError::token_exchange(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::token_exchange(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(FeedError::token_exchange(format!(
                "token exchange failed ({status}): {body}"
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| FeedError::invalid_response(format!("invalid token response: {e}")))?;

        info!("exchanged authorization code for tokens");
        Ok(token_response.into_token_set())
    }

    /// Obtains a fresh token set using a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> FeedResult<TokenSet> {
        let params = [
            ("refresh_token", refresh_token),
            ("client_id", self.config.credentials.client_id.as_str()),
            (
                "client_secret",
                self.config.credentials.client_secret.as_str(),
            ),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FeedError::refresh_failed(format!("refresh request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::refresh_failed(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(FeedError::refresh_failed(format!(
                "token refresh failed ({status}): {body}"
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| FeedError::invalid_response(format!("invalid token response: {e}")))?;

        info!("refreshed access token");
        Ok(token_response.into_token_set())
    }
}

/// Response from the provider's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    /// Default token lifetime when the provider omits `expires_in`.
    const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

    fn into_token_set(self) -> TokenSet {
        TokenSet::from_response(
            self.access_token,
            self.refresh_token,
            self.expires_in.unwrap_or(Self::DEFAULT_EXPIRES_IN_SECS),
        )
    }
}
