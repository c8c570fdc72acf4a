//! Raw stream payloads from the feed provider.
//!
//! The provider's stream-contents endpoint returns loosely shaped JSON; this
//! module models it as a tagged, partially-optional schema so that shape
//! surprises are caught at the boundary instead of leaking into the rest of
//! the application. Every field that the provider has been observed to omit
//! is an `Option`.

use serde::{Deserialize, Serialize};

/// Response from the stream-contents endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    /// The items in the requested stream.
    #[serde(default)]
    pub items: Vec<StreamItem>,

    /// Continuation token for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

/// A single raw item from the stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamItem {
    /// Provider-assigned item id.
    pub id: String,

    /// The article headline.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication time in Unix seconds.
    #[serde(default)]
    pub published: Option<i64>,

    /// Canonical link to the article.
    #[serde(default)]
    pub canonical: Option<StreamLink>,

    /// Alternate links, first entry preferred.
    #[serde(default)]
    pub alternate: Vec<StreamLink>,

    /// The article body as provider-rendered HTML.
    #[serde(default)]
    pub summary: Option<StreamSummary>,

    /// The originating feed.
    #[serde(default)]
    pub origin: Option<StreamOrigin>,

    /// Explicit lead-image asset.
    #[serde(default)]
    pub visual: Option<StreamVisual>,

    /// Hierarchical category labels, mixing user labels with the
    /// provider's internal read/starred state markers.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A link attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamLink {
    pub href: String,
}

/// Provider-rendered HTML body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSummary {
    #[serde(default)]
    pub content: String,
}

/// The feed an item came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamOrigin {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// An explicit visual asset for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamVisual {
    #[serde(default)]
    pub url: Option<String>,
}

impl StreamItem {
    /// Creates a minimal item with just an id, for building test payloads.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the published time (Unix seconds).
    pub fn with_published(mut self, published: i64) -> Self {
        self.published = Some(published);
        self
    }

    /// Builder method to set the canonical link.
    pub fn with_canonical(mut self, href: impl Into<String>) -> Self {
        self.canonical = Some(StreamLink { href: href.into() });
        self
    }

    /// Builder method to add an alternate link.
    pub fn with_alternate(mut self, href: impl Into<String>) -> Self {
        self.alternate.push(StreamLink { href: href.into() });
        self
    }

    /// Builder method to set the HTML body.
    pub fn with_summary_html(mut self, html: impl Into<String>) -> Self {
        self.summary = Some(StreamSummary {
            content: html.into(),
        });
        self
    }

    /// Builder method to set the origin title.
    pub fn with_origin(mut self, title: impl Into<String>) -> Self {
        self.origin = Some(StreamOrigin {
            title: Some(title.into()),
            html_url: None,
        });
        self
    }

    /// Builder method to set the visual asset URL.
    pub fn with_visual(mut self, url: impl Into<String>) -> Self {
        self.visual = Some(StreamVisual {
            url: Some(url.into()),
        });
        self
    }

    /// Builder method to add a category label.
    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        self.categories.push(label.into());
        self
    }
}
