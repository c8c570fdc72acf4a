//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use newsbrief_providers::{FeedCredentials, InoreaderConfig};

/// Name of the cookie carrying the OAuth state between initiation and
/// callback.
pub const STATE_COOKIE_NAME: &str = "inoreader_auth_state";

/// Where successful callbacks redirect the browser.
pub const CONNECTIONS_PATH: &str = "/profile/connections";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on.
    pub bind_addr: SocketAddr,

    /// Feed provider OAuth credentials.
    pub credentials: FeedCredentials,

    /// The callback URL registered with the feed provider.
    pub redirect_uri: String,

    /// Outbound request timeout.
    pub timeout: Duration,

    /// Token persistence path. `None` keeps tokens in memory only.
    pub token_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Creates a configuration with the given provider credentials.
    pub fn new(credentials: FeedCredentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            credentials,
            redirect_uri: redirect_uri.into(),
            timeout: Duration::from_secs(InoreaderConfig::DEFAULT_TIMEOUT_SECS),
            token_path: None,
        }
    }

    /// Builder: set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: persist tokens at the given path.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Builds the provider configuration from this server configuration.
    pub fn provider_config(&self) -> InoreaderConfig {
        InoreaderConfig::new(self.credentials.clone(), self.redirect_uri.clone())
            .with_timeout(self.timeout)
    }
}
