//! The normalized article model.
//!
//! An [`Article`] is the canonical representation of a news item after
//! provider-specific payloads have gone through normalization. Articles are
//! immutable once produced; the only field attached later is the lazily
//! generated summary, which lives in memory for the session only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel category for articles the provider left unlabeled.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A normalized news article.
///
/// Field names on the wire are camelCase to match what the reading UI
/// consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique identifier within the feed provider.
    pub id: String,

    /// The article headline.
    pub title: String,

    /// Plain-text body, HTML already stripped.
    pub content: String,

    /// Generated summary, attached lazily.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Canonical link to the article.
    pub url: String,

    /// Lead image, when the provider supplied or embedded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Publication instant.
    pub published: DateTime<Utc>,

    /// Human-readable origin (feed title).
    pub source: String,

    /// Category labels. Never empty: falls back to [`UNCATEGORIZED`].
    pub categories: Vec<String>,
}

impl Article {
    /// Creates an article with the minimum required fields.
    ///
    /// Categories default to the [`UNCATEGORIZED`] sentinel so the
    /// non-empty invariant holds from construction.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        published: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            summary: None,
            url: url.into(),
            image_url: None,
            published,
            source: source.into(),
            categories: vec![UNCATEGORIZED.to_string()],
        }
    }

    /// Builder method to set categories.
    ///
    /// An empty list is replaced with the sentinel to preserve the
    /// non-empty invariant.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = if categories.is_empty() {
            vec![UNCATEGORIZED.to_string()]
        } else {
            categories
        };
        self
    }

    /// Builder method to set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attaches a generated summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
