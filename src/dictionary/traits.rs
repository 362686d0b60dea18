use crate::error::AppResult;
use crate::model::{ArticleId, LanguageCode, MarkId, SearchResult};

/// Looks up the entries matching a query. The returned order is final.
pub trait DictionaryFilter: Send + Sync {
    fn filter(&self, language: &LanguageCode, query: &str) -> AppResult<Vec<SearchResult>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// One entry per mark, indexed by `MarkId`.
    pub senses: Vec<String>,
}

impl Article {
    pub fn sense(&self, mark: MarkId) -> Option<&str> {
        self.senses.get(mark.0 as usize).map(String::as_str)
    }
}

pub trait ArticleSource {
    fn article(&self, id: ArticleId) -> Option<Article>;

    /// Word shown for a result in the list view of `language`. When several
    /// words share the result's sense, the one matching `query` is returned.
    fn headword(
        &self,
        language: &LanguageCode,
        result: &SearchResult,
        query: &str,
    ) -> Option<String>;
}
