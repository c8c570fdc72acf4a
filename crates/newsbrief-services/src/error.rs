//! Error types for the service facades.

use thiserror::Error;

/// An error from one of the service backends.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The recipient address failed validation.
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// The summary backend rejected or failed the request.
    #[error("summary generation failed: {0}")]
    SummaryFailed(String),

    /// The mail backend could not deliver the message.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Convenience alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
