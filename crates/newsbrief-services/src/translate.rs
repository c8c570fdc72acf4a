//! Translation facade.
//!
//! Translation is strictly best-effort: any backend failure or unknown input
//! degrades to the original text, so callers never branch on a translation
//! error. Translating text already in the target language is a no-op.

use tracing::debug;

use crate::BoxFuture;

/// A language offered by the translation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: &'static str,
    /// Native display name.
    pub name: &'static str,
}

/// Languages the UI offers for translation targets.
pub const AVAILABLE_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "ja", name: "日本語" },
    Language { code: "es", name: "Español" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "zh", name: "中文" },
];

/// Translates text into a target language.
pub trait Translator: Send + Sync {
    /// Translates `text` into `target_lang`.
    ///
    /// Returns the input unchanged when translation is impossible, whether
    /// because the backend failed or the text is already in the target
    /// language.
    fn translate<'a>(&'a self, text: &'a str, target_lang: &'a str) -> BoxFuture<'a, String>;
}

/// Deterministic translator backed by a fixed phrasebook.
///
/// Stands in for an AI translation backend. Anything outside the phrasebook
/// passes through unchanged.
#[derive(Debug, Default)]
pub struct PhrasebookTranslator;

/// `(source, target language, translation)` entries.
const PHRASEBOOK: &[(&str, &str, &str)] = &[("ニュース要約", "en", "News Summary")];

impl PhrasebookTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for PhrasebookTranslator {
    fn translate<'a>(&'a self, text: &'a str, target_lang: &'a str) -> BoxFuture<'a, String> {
        Box::pin(async move {
            for (source, lang, translation) in PHRASEBOOK {
                if *source == text && *lang == target_lang {
                    debug!(target_lang, "translated via phrasebook");
                    return (*translation).to_string();
                }
            }
            text.to_string()
        })
    }
}
