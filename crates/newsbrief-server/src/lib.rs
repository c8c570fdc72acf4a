//! HTTP API: OAuth callback orchestration, feed, services.
//!
//! This crate wires the provider and service layers into an axum router:
//! - Authorization flow endpoints with the state-cookie CSRF handshake
//! - The never-failing news endpoint with fixture fallback
//! - Summary, translation, digest, and preferences endpoints
//!
//! # Example
//!
//! ```rust,no_run
//! use newsbrief_providers::FeedCredentials;
//! use newsbrief_server::{router, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::in_memory(
//!         FeedCredentials::new("client-id", "client-secret"),
//!         "http://localhost:3000/api/auth/feed/callback",
//!     )?;
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

mod callback;
mod config;
mod digest;
mod error;
mod routes;
mod session;
mod users;

pub use callback::{run_callback, CallbackParams, CallbackStage};
pub use config::{ServerConfig, CONNECTIONS_PATH, STATE_COOKIE_NAME};
pub use digest::render_digest;
pub use error::{ServerError, ServerResult};
pub use routes::{router, AppState};
pub use session::{clear_state_cookie, cookie_value, state_cookie, Identity};
pub use users::{MemoryUserStore, UserStore};
