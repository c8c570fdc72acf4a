//! Service facades for summarization, translation, and mail delivery.
//!
//! Each facade is a trait with a deterministic stub implementation, keeping
//! the HTTP layer decoupled from the eventual AI and mail backends:
//!
//! - [`Summarizer`] - typed failures, one attempt per call
//! - [`Translator`] - infallible, degrades to the input text
//! - [`Mailer`] - validates recipients before delivery

use std::future::Future;
use std::pin::Pin;

pub mod error;
pub mod mailer;
pub mod summarize;
pub mod translate;

/// A boxed future for async trait methods.
///
/// Keeps the facade traits object-safe so handlers can hold `dyn` backends.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use error::{ServiceError, ServiceResult};
pub use mailer::{validate_recipient, Delivery, Mailer, StubMailer};
pub use summarize::{KeywordSummarizer, Summarizer};
pub use translate::{PhrasebookTranslator, Translator, AVAILABLE_LANGUAGES};
