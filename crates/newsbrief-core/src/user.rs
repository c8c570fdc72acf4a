//! User accounts, preferences and reading stats.

use serde::{Deserialize, Serialize};

/// UI theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Curated reading preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Preferred category labels.
    pub categories: Vec<String>,
    /// Preferred source titles.
    pub sources: Vec<String>,
    /// Whether the user opted into the email digest.
    pub email_digest: bool,
    /// UI theme.
    pub theme: Theme,
}

/// Reading activity counters.
///
/// Counters only move forward; mutation goes through the `record_*`
/// methods so callers cannot decrement them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    articles_read: u64,
    articles_saved: u64,
    summaries_generated: u64,
}

impl Stats {
    /// Records one article read.
    pub fn record_read(&mut self) {
        self.articles_read += 1;
    }

    /// Records one article saved.
    pub fn record_saved(&mut self) {
        self.articles_saved += 1;
    }

    /// Records one generated summary.
    pub fn record_summary(&mut self) {
        self.summaries_generated += 1;
    }

    pub fn articles_read(&self) -> u64 {
        self.articles_read
    }

    pub fn articles_saved(&self) -> u64 {
        self.articles_saved
    }

    pub fn summaries_generated(&self) -> u64 {
        self.summaries_generated
    }
}

/// A signed-in user.
///
/// Created at first successful authentication; preferences change only
/// through the explicit preferences-update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub preferences: Preferences,
    pub stats: Stats,
}

impl User {
    /// Creates a user with default preferences and zeroed stats.
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        let username = username.into();
        let display_name = display_name_for(&username);
        Self {
            id: id.into(),
            username,
            display_name,
            email: email.into(),
            avatar_url: None,
            preferences: Preferences::default(),
            stats: Stats::default(),
        }
    }

    /// Builder method to set the avatar URL.
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Builder method to set preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Capitalizes the first letter of the username for display.
fn display_name_for(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
