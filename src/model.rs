use std::fmt;

use serde::Deserialize;

/// Opaque number of one dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u32);

/// Opaque number of a position inside an article, usually one sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct MarkId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    pub article: ArticleId,
    pub mark: MarkId,
}

impl SearchResult {
    pub fn new(article: ArticleId, mark: MarkId) -> Self {
        Self { article, mark }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Code of the base language every other language is translated from.
    pub const DEFAULT: &'static str = "eo";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn default_language() -> Self {
        Self::new(Self::DEFAULT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub target_language: LanguageCode,
    /// The host may render this entry as a compact action.
    pub emphasized: bool,
}
