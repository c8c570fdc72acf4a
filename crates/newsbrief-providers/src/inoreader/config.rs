//! Inoreader provider configuration.

use std::time::Duration;

use crate::error::{FeedError, FeedResult};

/// OAuth 2.0 credentials for Inoreader API access.
///
/// Obtained by registering the application in the Inoreader developer
/// console.
#[derive(Debug, Clone)]
pub struct FeedCredentials {
    /// The OAuth 2.0 client ID.
    pub client_id: String,
    /// The OAuth 2.0 client secret.
    pub client_secret: String,
}

impl FeedCredentials {
    /// Creates new credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Loads credentials from `INOREADER_CLIENT_ID` and
    /// `INOREADER_CLIENT_SECRET`.
    pub fn from_env() -> FeedResult<Self> {
        let client_id = std::env::var("INOREADER_CLIENT_ID")
            .map_err(|_| FeedError::configuration("INOREADER_CLIENT_ID is not set"))?;
        let client_secret = std::env::var("INOREADER_CLIENT_SECRET")
            .map_err(|_| FeedError::configuration("INOREADER_CLIENT_SECRET is not set"))?;
        Ok(Self::new(client_id, client_secret))
    }

    /// Validates that both fields are present.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.is_empty() {
            return Err("client_id is required");
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required");
        }
        Ok(())
    }
}

/// Configuration for the Inoreader provider.
///
/// The endpoint URLs default to the public Inoreader service and are
/// overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct InoreaderConfig {
    /// OAuth credentials for API access.
    pub credentials: FeedCredentials,

    /// Where the provider redirects after user consent.
    pub redirect_uri: String,

    /// Authorization endpoint shown to the user.
    pub auth_url: String,

    /// Token endpoint for code exchange and refresh.
    pub token_url: String,

    /// Base URL of the content API.
    pub api_base: String,

    /// OAuth scope to request.
    pub scope: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl InoreaderConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Default OAuth scope for read access.
    pub const DEFAULT_SCOPE: &'static str = "read";

    const DEFAULT_AUTH_URL: &'static str = "https://www.inoreader.com/oauth2/auth";
    const DEFAULT_TOKEN_URL: &'static str = "https://www.inoreader.com/oauth2/token";
    const DEFAULT_API_BASE: &'static str = "https://www.inoreader.com/reader/api/0";

    /// Creates a configuration with the given credentials and redirect URI.
    pub fn new(credentials: FeedCredentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            credentials,
            redirect_uri: redirect_uri.into(),
            auth_url: Self::DEFAULT_AUTH_URL.to_string(),
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            scope: Self::DEFAULT_SCOPE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the authorization endpoint.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Overrides the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Overrides the content API base URL.
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Sets the OAuth scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.credentials
            .validate()
            .map_err(|e| format!("invalid credentials: {e}"))?;

        if self.redirect_uri.is_empty() {
            return Err("redirect_uri is required".to_string());
        }

        if self.scope.is_empty() {
            return Err("scope is required".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> FeedCredentials {
        FeedCredentials::new("test-client", "test-secret")
    }

    #[test]
    fn credentials_validation() {
        assert!(test_credentials().validate().is_ok());
        assert!(FeedCredentials::new("", "secret").validate().is_err());
        assert!(FeedCredentials::new("id", "").validate().is_err());
    }

    #[test]
    fn config_defaults() {
        let config = InoreaderConfig::new(test_credentials(), "http://localhost:3000/callback");
        assert_eq!(config.auth_url, "https://www.inoreader.com/oauth2/auth");
        assert_eq!(config.token_url, "https://www.inoreader.com/oauth2/token");
        assert_eq!(config.api_base, "https://www.inoreader.com/reader/api/0");
        assert_eq!(config.scope, "read");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_methods() {
        let config = InoreaderConfig::new(test_credentials(), "http://localhost:3000/callback")
            .with_auth_url("http://127.0.0.1:9000/auth")
            .with_token_url("http://127.0.0.1:9000/token")
            .with_api_base("http://127.0.0.1:9000/api")
            .with_scope("read write")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.auth_url, "http://127.0.0.1:9000/auth");
        assert_eq!(config.token_url, "http://127.0.0.1:9000/token");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/api");
        assert_eq!(config.scope, "read write");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn config_validation_rejects_empty_redirect() {
        let config = InoreaderConfig::new(test_credentials(), "");
        assert!(config.validate().is_err());
    }
}
