//! Error types for feed provider operations.
//!
//! This module defines the error types that can occur when talking to the
//! feed provider: the OAuth token endpoint, the stream contents API, and the
//! token store.

use std::fmt;
use thiserror::Error;

/// The category of a feed error.
///
/// Provides a high-level classification of errors for use in HTTP responses
/// and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// No usable credentials for the user - not connected or token invalid.
    NotAuthenticated,
    /// The authorization-code exchange was rejected by the provider.
    TokenExchangeFailed,
    /// The refresh-token grant was rejected by the provider.
    RefreshFailed,
    /// A refresh was needed but no refresh token is on file.
    NoRefreshToken,
    /// The token store could not be read or written.
    PersistenceFailed,
    /// The provider is unreachable or returned a server error (timeouts,
    /// connect failures, 429, 5xx).
    UpstreamUnavailable,
    /// The provider's response could not be parsed.
    InvalidResponse,
    /// Missing or invalid configuration.
    ConfigurationError,
}

impl FeedErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable)
    }

    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::TokenExchangeFailed => "token_exchange_failed",
            Self::RefreshFailed => "refresh_failed",
            Self::NoRefreshToken => "no_refresh_token",
            Self::PersistenceFailed => "persistence_failed",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while interacting with the feed provider.
///
/// The message may carry raw provider detail (error bodies from the token
/// endpoint); it is intended for server-side logs, never for verbatim
/// display to end users.
#[derive(Debug, Error)]
pub struct FeedError {
    /// The error code categorizing this error.
    code: FeedErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a not-authenticated error.
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::NotAuthenticated, message)
    }

    /// Creates a token-exchange error.
    pub fn token_exchange(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::TokenExchangeFailed, message)
    }

    /// Creates a refresh-failed error.
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::RefreshFailed, message)
    }

    /// Creates a no-refresh-token error.
    pub fn no_refresh_token(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::NoRefreshToken, message)
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::PersistenceFailed, message)
    }

    /// Creates an upstream-unavailable error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::UpstreamUnavailable, message)
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::ConfigurationError, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed provider operations.
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(FeedErrorCode::UpstreamUnavailable.is_retryable());
        assert!(!FeedErrorCode::TokenExchangeFailed.is_retryable());
        assert!(!FeedErrorCode::NoRefreshToken.is_retryable());
        assert!(!FeedErrorCode::NotAuthenticated.is_retryable());
    }

    #[test]
    fn error_code_display() {
        assert_eq!(
            FeedErrorCode::TokenExchangeFailed.as_str(),
            "token_exchange_failed"
        );
        assert_eq!(FeedErrorCode::NoRefreshToken.as_str(), "no_refresh_token");
    }

    #[test]
    fn feed_error_creation() {
        let err = FeedError::refresh_failed("provider said no");
        assert_eq!(err.code(), FeedErrorCode::RefreshFailed);
        assert_eq!(err.message(), "provider said no");
        assert!(!err.is_retryable());
    }

    #[test]
    fn feed_error_display() {
        let err = FeedError::upstream("connection timeout");
        let display = format!("{}", err);
        assert!(display.contains("upstream_unavailable"));
        assert!(display.contains("connection timeout"));
    }

    #[test]
    fn feed_error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("disk full");
        let err = FeedError::persistence("failed to write token file").with_source(io_err);
        assert!(err.source().is_some());
    }
}
