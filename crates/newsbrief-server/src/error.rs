//! Server error types and their HTTP mapping.
//!
//! Responses carry generic messages only; provider detail stays in logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use newsbrief_providers::{FeedError, FeedErrorCode};
use newsbrief_services::ServiceError;

/// Result type for handler operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A required query or body parameter is absent.
    #[error("missing required parameters")]
    MissingParameters,

    /// The callback state did not match the stored value.
    #[error("invalid authorization state")]
    InvalidState,

    /// The caller carries no usable identity.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Malformed request body or field values.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An error from the feed provider layer.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// An error from a service facade.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingParameters => {
                (StatusCode::BAD_REQUEST, "Missing required parameters")
            }
            Self::InvalidState => (StatusCode::BAD_REQUEST, "Invalid authorization state"),
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::BadRequest(message) => {
                warn!(message, "rejected request");
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
                    .into_response();
            }
            Self::Feed(e) => {
                // raw provider detail goes to logs only
                error!(code = %e.code(), error = %e, "feed provider error");
                match e.code() {
                    FeedErrorCode::NotAuthenticated | FeedErrorCode::NoRefreshToken => {
                        (StatusCode::UNAUTHORIZED, "Authentication required")
                    }
                    FeedErrorCode::TokenExchangeFailed => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to authenticate with the feed provider",
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An unexpected error occurred",
                    ),
                }
            }
            Self::Service(ServiceError::InvalidRecipient(_)) => {
                (StatusCode::BAD_REQUEST, "Please enter a valid email address")
            }
            Self::Service(e) => {
                error!(error = %e, "service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
