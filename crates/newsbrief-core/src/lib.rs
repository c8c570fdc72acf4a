//! Core types: articles, users, preferences, tracing

pub mod article;
pub mod tracing;
pub mod user;

pub use article::Article;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use user::{Preferences, Stats, Theme, User};
