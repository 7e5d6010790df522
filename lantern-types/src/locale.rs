//! Locale-keyed text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Locale preferred when resolving [`LocalizedText`].
pub const DEFAULT_LOCALE: &str = "en";

/// Returned when no locale has usable text.
pub const FALLBACK_DESCRIPTION: &str = "No description provided";

/// Text that is either plain or keyed by locale tag (`{"en": "...", "de": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// A single string for every locale.
    Plain(String),
    /// Locale tag to text.
    Localized(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Resolve against [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn resolve(&self) -> &str {
        self.resolve_for(DEFAULT_LOCALE)
    }

    /// Pick the text for `locale`, else the first non-blank entry in tag
    /// order, else [`FALLBACK_DESCRIPTION`].
    #[must_use]
    pub fn resolve_for(&self, locale: &str) -> &str {
        match self {
            LocalizedText::Plain(text) if !text.trim().is_empty() => text,
            LocalizedText::Plain(_) => FALLBACK_DESCRIPTION,
            LocalizedText::Localized(map) => map
                .get(locale)
                .filter(|t| !t.trim().is_empty())
                .or_else(|| map.values().find(|t| !t.trim().is_empty()))
                .map(String::as_str)
                .unwrap_or(FALLBACK_DESCRIPTION),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::Plain(text.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::Plain(text)
    }
}

impl From<BTreeMap<String, String>> for LocalizedText {
    fn from(map: BTreeMap<String, String>) -> Self {
        LocalizedText::Localized(map)
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}
