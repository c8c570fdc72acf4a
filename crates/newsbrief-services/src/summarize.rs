//! Article summarization facade.
//!
//! Summaries are generated on demand and cached by the caller. Failures are
//! typed and surfaced; the reading UI offers a retry, so the facade makes
//! exactly one attempt per call.

use tracing::debug;

use crate::error::ServiceResult;
use crate::BoxFuture;

/// Generates a short summary for an article.
pub trait Summarizer: Send + Sync {
    /// Produces a summary for the given title and body.
    ///
    /// One attempt per call; retry policy belongs to the caller.
    fn summarize<'a>(&'a self, title: &'a str, content: &'a str)
        -> BoxFuture<'a, ServiceResult<String>>;
}

/// Deterministic summarizer keyed on title keywords.
///
/// Stands in for an LLM backend. Each known topic maps to a fixed summary;
/// anything else gets a generic one, so output depends only on the input.
#[derive(Debug, Default)]
pub struct KeywordSummarizer;

/// Topic keyword sets paired with their canned summaries.
const TOPIC_SUMMARIES: &[(&[&str], &str)] = &[
    (
        &["quantum"],
        "Scientists have achieved a breakthrough in quantum computing that dramatically \
         outperforms traditional computers. This development could transform cryptography, \
         drug discovery, and complex system modeling by solving previously intractable \
         problems.",
    ),
    (
        &["climate"],
        "World leaders have reached a significant agreement to reduce carbon emissions by \
         50% by 2030, with financial support for developing nations. While the pact \
         represents progress, implementation and accountability mechanisms will be crucial \
         for its success.",
    ),
    (
        &["ai", "artificial intelligence"],
        "A new AI system can predict protein structures with unprecedented accuracy, \
         potentially revolutionizing drug development and disease research. This AI can \
         determine complex protein shapes in minutes rather than the months required by \
         traditional laboratory methods.",
    ),
    (
        &["augmented reality", "ar"],
        "A major tech company has launched advanced AR glasses that project high-resolution \
         holograms integrated with the physical world. The lightweight device has \
         applications in gaming, collaboration, and education, potentially driving \
         mainstream AR adoption.",
    ),
    (
        &["renewable", "energy"],
        "Renewable energy has become more economical than fossil fuels in most global \
         markets, with solar and wind costs declining over 70% in a decade. This economic \
         advantage may accelerate clean energy transition regardless of policy \
         interventions.",
    ),
    (
        &["cancer", "treatment"],
        "A promising new cancer treatment combining immunotherapy with targeted genetic \
         modification has shown remarkable results in early trials. Patients with advanced, \
         previously untreatable cancers experienced significant tumor reduction, with some \
         achieving complete remission.",
    ),
    (
        &["space"],
        "A private space company will begin offering commercial space tourism flights next \
         year at $250,000 per ticket. The suborbital flights will allow passengers to \
         experience weightlessness and view Earth from space, with the first year already \
         fully booked.",
    ),
    (
        &["chip", "semiconductor"],
        "The global semiconductor shortage affecting multiple industries is expected to \
         ease by year-end as new manufacturing capacity comes online. However, building \
         resilient semiconductor supply chains will require longer-term strategic \
         investments.",
    ),
];

/// Summary returned when no topic keyword matches.
const GENERIC_SUMMARY: &str =
    "This article discusses important developments in its field, highlighting key \
     innovations and their potential impact. Experts suggest these changes could have \
     significant implications for the industry and broader society in the coming years.";

impl KeywordSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn summary_for(title: &str) -> &'static str {
        let keywords = title.to_lowercase();
        for (topics, summary) in TOPIC_SUMMARIES {
            if topics.iter().any(|topic| keywords.contains(topic)) {
                return summary;
            }
        }
        GENERIC_SUMMARY
    }
}

impl Summarizer for KeywordSummarizer {
    fn summarize<'a>(
        &'a self,
        title: &'a str,
        _content: &'a str,
    ) -> BoxFuture<'a, ServiceResult<String>> {
        Box::pin(async move {
            debug!(title, "generating summary");
            Ok(Self::summary_for(title).to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_topic_gets_its_summary() {
        let summarizer = KeywordSummarizer::new();
        let summary = summarizer
            .summarize("Breakthrough in Quantum Computing", "body")
            .await
            .unwrap();
        assert!(summary.contains("quantum computing"));
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let summarizer = KeywordSummarizer::new();
        let summary = summarizer
            .summarize("CLIMATE Summit Agreement", "body")
            .await
            .unwrap();
        assert!(summary.contains("carbon emissions"));
    }

    #[tokio::test]
    async fn unknown_topic_gets_generic_summary() {
        let summarizer = KeywordSummarizer::new();
        let summary = summarizer
            .summarize("Local Bakery Wins Award", "body")
            .await
            .unwrap();
        assert_eq!(summary, GENERIC_SUMMARY);
    }

    #[tokio::test]
    async fn output_is_deterministic() {
        let summarizer = KeywordSummarizer::new();
        let a = summarizer.summarize("Space Tourism", "x").await.unwrap();
        let b = summarizer.summarize("Space Tourism", "y").await.unwrap();
        assert_eq!(a, b);
    }
}
