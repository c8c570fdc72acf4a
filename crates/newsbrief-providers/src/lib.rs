//! Feed provider integration and article normalization.
//!
//! This crate covers everything between the feed provider's wire format and
//! the application's [`Article`](newsbrief_core::Article) model:
//!
//! - [`inoreader`] - OAuth flow, token refresh, and the stream API client
//! - [`TokenStore`] - per-user token persistence (file-backed or in-memory)
//! - [`normalize_item`] - pipeline from raw stream items to articles
//! - [`FeedAdapter`] - the never-failing fetch entry point with fixture
//!   fallback
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Inoreader API   │
//! └────────┬─────────┘
//!          │ StreamClient
//!          ▼
//! ┌──────────────────┐     ┌──────────────┐
//! │   StreamItem     │     │  TokenStore  │
//! └────────┬─────────┘     └──────┬───────┘
//!          │ normalize_item       │ FeedConnector
//!          ▼                      ▼
//! ┌──────────────────┐     ┌──────────────┐
//! │     Article      │◄────│ FeedAdapter  │── fixtures on failure
//! └──────────────────┘     └──────────────┘
//! ```

pub mod adapter;
pub mod error;
pub mod fixtures;
pub mod inoreader;
pub mod normalize;
pub mod raw_item;
pub mod store;
pub mod tokens;

// Re-export main types at crate root
pub use adapter::FeedAdapter;
pub use error::{FeedError, FeedErrorCode, FeedResult};
pub use fixtures::fallback_articles;
pub use inoreader::{
    AuthRequest, FeedConnector, FeedCredentials, InoreaderConfig, OAuthClient, OAuthState,
    StreamClient,
};
pub use normalize::{normalize_item, normalize_items};
pub use raw_item::{StreamItem, StreamResponse};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use tokens::{TokenRecord, TokenSet, REFRESH_MARGIN_SECS};
