//! Inoreader feed provider implementation.
//!
//! This module ties together the pieces of the provider integration:
//!
//! - OAuth 2.0 authorization-code flow against Inoreader's endpoints
//! - Per-user token persistence with automatic refresh before expiry
//! - The stream-contents API client for the user's reading list
//!
//! # Authorization Flow
//!
//! 1. The server initiates the flow for a logged-in user and stores the
//!    CSRF state in an HTTP-only cookie
//! 2. The user grants access on Inoreader's consent page
//! 3. Inoreader redirects back with `code` and `state`
//! 4. The callback verifies the state against the cookie, exchanges the
//!    code for tokens, and persists them keyed by the user
//! 5. Subsequent feed fetches use the stored access token, refreshing it
//!    when it is inside the expiry safety margin

mod client;
mod config;
mod connector;
mod oauth;

pub use client::StreamClient;
pub use config::{FeedCredentials, InoreaderConfig};
pub use connector::FeedConnector;
pub use oauth::{AuthRequest, OAuthClient, OAuthState};
