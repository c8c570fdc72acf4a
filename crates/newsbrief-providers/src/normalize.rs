//! StreamItem to Article conversion pipeline.
//!
//! This module transforms provider-native [`StreamItem`] payloads into the
//! canonical [`Article`] model used throughout the application.
//!
//! The normalization process:
//! 1. Strips HTML from the provider's rendered body and collapses whitespace
//! 2. Resolves a lead image (explicit asset, else first `<img>` in the HTML)
//! 3. Reduces hierarchical category labels to display labels
//! 4. Converts Unix-seconds timestamps and fills fallback sentinels

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use newsbrief_core::Article;

use crate::raw_item::StreamItem;

/// Placeholder body for items whose HTML strips down to nothing.
pub const NO_CONTENT: &str = "No content available";

/// Fallback headline for untitled items.
pub const UNTITLED: &str = "Untitled Article";

/// Fallback origin for items without feed metadata.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// At most this many category labels are kept per article.
const MAX_CATEGORIES: usize = 3;

/// Regex matching any HTML tag.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Regex matching runs of whitespace.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Regex extracting the src of the first `<img>` tag.
static IMG_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("invalid img regex"));

/// Converts a [`StreamItem`] to an [`Article`].
///
/// This is the main entry point for item normalization. Every fallback rule
/// is applied here so callers always receive a fully populated article.
pub fn normalize_item(raw: &StreamItem) -> Article {
    let content = raw
        .summary
        .as_ref()
        .map(|s| strip_html(&s.content))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| NO_CONTENT.to_string());

    let title = raw
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNTITLED);

    let source = raw
        .origin
        .as_ref()
        .and_then(|o| o.title.as_deref())
        .unwrap_or(UNKNOWN_SOURCE);

    let url = raw
        .canonical
        .as_ref()
        .map(|l| l.href.clone())
        .or_else(|| raw.alternate.first().map(|l| l.href.clone()))
        .unwrap_or_else(|| "#".to_string());

    let mut article = Article::new(&raw.id, title, content, url, published_at(raw), source)
        .with_categories(normalize_categories(&raw.categories));

    if let Some(image_url) = resolve_image(raw) {
        article = article.with_image_url(image_url);
    }

    article
}

/// Batch normalize the items of a stream response.
pub fn normalize_items(raw_items: &[StreamItem]) -> Vec<Article> {
    raw_items.iter().map(normalize_item).collect()
}

/// Strips all HTML tags and collapses whitespace to single spaces.
fn strip_html(html: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(html, " ");
    WHITESPACE_REGEX
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Resolves the lead image: explicit visual asset first, else the first
/// `<img src="...">` embedded in the raw HTML.
fn resolve_image(raw: &StreamItem) -> Option<String> {
    if let Some(url) = raw.visual.as_ref().and_then(|v| v.url.clone()) {
        return Some(url);
    }

    let html = raw.summary.as_ref().map(|s| s.content.as_str())?;
    IMG_SRC_REGEX
        .captures(html)
        .map(|caps| caps[1].to_string())
}

/// Reduces the provider's hierarchical category labels to display labels.
///
/// Administrative labels (those carrying `user/` or `state/` segments) are
/// dropped, the last path segment of each remaining label is kept, and the
/// list is capped at [`MAX_CATEGORIES`].
fn normalize_categories(raw: &[String]) -> Vec<String> {
    raw.iter()
        .filter(|cat| !cat.contains("user/") && !cat.contains("state/"))
        .filter_map(|cat| cat.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .take(MAX_CATEGORIES)
        .collect()
}

/// Converts the provider's Unix-seconds timestamp, substituting the current
/// time when absent or out of range.
fn published_at(raw: &StreamItem) -> DateTime<Utc> {
    raw.published
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsbrief_core::article::UNCATEGORIZED;

    fn sample_item() -> StreamItem {
        StreamItem::new("item-1")
            .with_title("Quantum Leap")
            .with_published(1717240000)
            .with_canonical("https://example.com/quantum")
            .with_summary_html("<p>Scientists <b>announced</b> a breakthrough.</p>")
            .with_origin("Wired")
    }

    mod content {
        use super::*;

        #[test]
        fn strips_tags_and_collapses_whitespace() {
            let article = normalize_item(&sample_item());
            assert_eq!(article.content, "Scientists announced a breakthrough.");
        }

        #[test]
        fn empty_html_becomes_placeholder() {
            let item = sample_item().with_summary_html("<div>  </div>");
            let article = normalize_item(&item);
            assert_eq!(article.content, NO_CONTENT);
        }

        #[test]
        fn missing_summary_becomes_placeholder() {
            let article = normalize_item(&StreamItem::new("item-2"));
            assert_eq!(article.content, NO_CONTENT);
        }

        #[test]
        fn multiline_html_collapses_to_single_spaces() {
            let item = StreamItem::new("item-3")
                .with_summary_html("<p>line one</p>\n\n  <p>line\ttwo</p>");
            let article = normalize_item(&item);
            assert_eq!(article.content, "line one line two");
        }
    }

    mod images {
        use super::*;

        #[test]
        fn prefers_explicit_visual() {
            let item = sample_item()
                .with_visual("https://cdn.example.com/lead.png")
                .with_summary_html(r#"<img src="https://cdn.example.com/embedded.png">"#);
            let article = normalize_item(&item);
            assert_eq!(
                article.image_url.as_deref(),
                Some("https://cdn.example.com/lead.png")
            );
        }

        #[test]
        fn falls_back_to_embedded_img() {
            let item = StreamItem::new("item-4")
                .with_summary_html(r#"<p>text</p><img alt="x" src="https://cdn.example.com/a.jpg"><img src="https://cdn.example.com/b.jpg">"#);
            let article = normalize_item(&item);
            assert_eq!(
                article.image_url.as_deref(),
                Some("https://cdn.example.com/a.jpg")
            );
        }

        #[test]
        fn no_image_stays_unset() {
            let article = normalize_item(&sample_item());
            assert!(article.image_url.is_none());
        }
    }

    mod categories {
        use super::*;

        #[test]
        fn filters_administrative_labels() {
            let item = sample_item()
                .with_category("user/-/label/Tech")
                .with_category("user/-/state/com.google/read");
            let article = normalize_item(&item);
            // labels with user/ or state/ segments are all administrative
            assert_eq!(article.categories, vec![UNCATEGORIZED.to_string()]);
        }

        #[test]
        fn keeps_last_path_segment() {
            let item = sample_item()
                .with_category("feeds/technology/Tech")
                .with_category("feeds/science/Science");
            let article = normalize_item(&item);
            assert_eq!(
                article.categories,
                vec!["Tech".to_string(), "Science".to_string()]
            );
        }

        #[test]
        fn caps_at_three() {
            let item = sample_item()
                .with_category("a/One")
                .with_category("b/Two")
                .with_category("c/Three")
                .with_category("d/Four");
            let article = normalize_item(&item);
            assert_eq!(article.categories.len(), 3);
        }

        #[test]
        fn empty_becomes_sentinel() {
            let article = normalize_item(&sample_item());
            assert_eq!(article.categories, vec![UNCATEGORIZED.to_string()]);
        }

        #[test]
        fn plain_label_kept_verbatim() {
            let item = sample_item().with_category("Tech");
            let article = normalize_item(&item);
            assert_eq!(article.categories, vec!["Tech".to_string()]);
        }
    }

    mod fallbacks {
        use super::*;

        #[test]
        fn untitled_item() {
            let mut item = sample_item();
            item.title = Some("   ".to_string());
            let article = normalize_item(&item);
            assert_eq!(article.title, UNTITLED);
        }

        #[test]
        fn unknown_source() {
            let mut item = sample_item();
            item.origin = None;
            let article = normalize_item(&item);
            assert_eq!(article.source, UNKNOWN_SOURCE);
        }

        #[test]
        fn url_prefers_canonical_then_alternate_then_hash() {
            let article = normalize_item(&sample_item());
            assert_eq!(article.url, "https://example.com/quantum");

            let mut item = sample_item();
            item.canonical = None;
            let item = item.with_alternate("https://example.com/alt");
            assert_eq!(normalize_item(&item).url, "https://example.com/alt");

            let mut bare = sample_item();
            bare.canonical = None;
            assert_eq!(normalize_item(&bare).url, "#");
        }

        #[test]
        fn published_seconds_converted() {
            let article = normalize_item(&sample_item());
            assert_eq!(article.published.timestamp(), 1717240000);
        }

        #[test]
        fn missing_published_uses_now() {
            let before = Utc::now();
            let article = normalize_item(&StreamItem::new("item-5"));
            assert!(article.published >= before);
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn normalizes_all_items() {
            let items = vec![sample_item(), StreamItem::new("item-2")];
            let articles = normalize_items(&items);
            assert_eq!(articles.len(), 2);
            assert_eq!(articles[0].id, "item-1");
            assert_eq!(articles[1].id, "item-2");
        }
    }
}
