//! Mail delivery facade.
//!
//! Recipient addresses are validated before any delivery attempt so a typo
//! fails fast instead of bouncing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::BoxFuture;

/// Loose address shape check: something@something.something, no whitespace.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Confirmation of a completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// The address the message went to.
    pub recipient: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Sends HTML mail.
pub trait Mailer: Send + Sync {
    /// Delivers an HTML message to a single recipient.
    fn send<'a>(
        &'a self,
        recipient: &'a str,
        subject: &'a str,
        html: &'a str,
    ) -> BoxFuture<'a, ServiceResult<Delivery>>;
}

/// Validates a recipient address shape.
pub fn validate_recipient(recipient: &str) -> ServiceResult<()> {
    if EMAIL_REGEX.is_match(recipient) {
        Ok(())
    } else {
        Err(ServiceError::InvalidRecipient(recipient.to_string()))
    }
}

/// Mailer that validates and logs but never talks to a mail backend.
#[derive(Debug, Default)]
pub struct StubMailer;

impl StubMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Mailer for StubMailer {
    fn send<'a>(
        &'a self,
        recipient: &'a str,
        subject: &'a str,
        _html: &'a str,
    ) -> BoxFuture<'a, ServiceResult<Delivery>> {
        Box::pin(async move {
            validate_recipient(recipient)?;
            info!(recipient, subject, "delivered mail");
            Ok(Delivery {
                recipient: recipient.to_string(),
                message: format!("Email sent successfully to {recipient}"),
            })
        })
    }
}
