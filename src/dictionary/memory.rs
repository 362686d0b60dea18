use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::LanguageCatalog;
use crate::error::{AppError, AppResult};
use crate::model::{ArticleId, LanguageCode, MarkId, SearchResult};

use super::traits::{Article, ArticleSource, DictionaryFilter};

pub const DEFAULT_MAX_RESULTS: usize = 64;

const SAMPLE_DICTIONARY: &str = include_str!("sample.json");

#[derive(Debug, Deserialize)]
struct DictionaryFile {
    languages: Vec<LanguageRecord>,
    articles: Vec<ArticleRecord>,
    #[serde(default)]
    index: HashMap<LanguageCode, Vec<IndexRecord>>,
}

#[derive(Debug, Deserialize)]
struct LanguageRecord {
    code: LanguageCode,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArticleRecord {
    id: ArticleId,
    title: String,
    #[serde(default)]
    senses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IndexRecord {
    word: String,
    article: ArticleId,
    #[serde(default = "first_mark")]
    mark: MarkId,
}

fn first_mark() -> MarkId {
    MarkId(0)
}

#[derive(Debug, Clone)]
struct IndexEntry {
    folded: String,
    word: String,
    result: SearchResult,
}

/// Words of one language sorted by folded form, plus the positions of every
/// word pointing at a given sense.
#[derive(Debug, Clone, Default)]
struct LanguageIndex {
    entries: Vec<IndexEntry>,
    by_result: HashMap<SearchResult, Vec<usize>>,
}

impl LanguageIndex {
    fn new(mut entries: Vec<IndexEntry>) -> Self {
        entries.sort_by(|a, b| a.folded.cmp(&b.folded));
        let mut by_result: HashMap<SearchResult, Vec<usize>> = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            by_result.entry(entry.result).or_default().push(position);
        }
        Self { entries, by_result }
    }

    /// Synonyms share a result; the one the query actually hit wins.
    fn headword(&self, result: &SearchResult, folded_query: &str) -> Option<&IndexEntry> {
        let candidates: Vec<&IndexEntry> = self
            .by_result
            .get(result)?
            .iter()
            .map(|&position| &self.entries[position])
            .collect();
        if folded_query.is_empty() {
            return candidates.first().copied();
        }
        candidates
            .iter()
            .find(|entry| entry.folded.starts_with(folded_query))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|entry| entry.folded.contains(folded_query))
            })
            .or_else(|| candidates.first())
            .copied()
    }
}

/// Whole dictionary held in memory, searchable in every indexed language.
#[derive(Debug, Clone)]
pub struct MemoryDictionary {
    languages: Vec<(LanguageCode, String)>,
    articles: HashMap<ArticleId, Article>,
    indices: HashMap<LanguageCode, LanguageIndex>,
    max_results: usize,
}

impl MemoryDictionary {
    pub fn sample() -> AppResult<Self> {
        Self::from_json(SAMPLE_DICTIONARY, "built-in sample")
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(
                source,
                format!("failed to read dictionary: {}", path.display()),
            )
        })?;
        Self::from_json(&raw, &path.display().to_string())
    }

    pub fn from_json(raw: &str, origin: &str) -> AppResult<Self> {
        let file = serde_json::from_str::<DictionaryFile>(raw)
            .map_err(|source| AppError::dictionary(source, format!("failed to parse {origin}")))?;
        Self::from_file(file)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    fn from_file(file: DictionaryFile) -> AppResult<Self> {
        let mut articles = HashMap::with_capacity(file.articles.len());
        for record in file.articles {
            let article = Article {
                id: record.id,
                title: record.title,
                senses: record.senses,
            };
            if articles.insert(article.id, article).is_some() {
                return Err(AppError::invalid_argument(format!(
                    "duplicate article {}",
                    record.id.0
                )));
            }
        }

        let mut indices = HashMap::with_capacity(file.index.len());
        for (language, records) in file.index {
            let mut entries = Vec::with_capacity(records.len());
            for record in records {
                let Some(article) = articles.get(&record.article) else {
                    return Err(AppError::invalid_argument(format!(
                        "index word '{}' refers to unknown article {}",
                        record.word, record.article.0
                    )));
                };
                if record.mark.0 as usize >= article.senses.len().max(1) {
                    return Err(AppError::invalid_argument(format!(
                        "index word '{}' refers to unknown mark {} of article {}",
                        record.word, record.mark.0, record.article.0
                    )));
                }
                entries.push(IndexEntry {
                    folded: fold_query(&language, &record.word),
                    word: record.word,
                    result: SearchResult::new(record.article, record.mark),
                });
            }
            indices.insert(language, LanguageIndex::new(entries));
        }

        let languages = file
            .languages
            .into_iter()
            .map(|record| (record.code, record.name))
            .collect();

        Ok(Self {
            languages,
            articles,
            indices,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }
}

impl DictionaryFilter for MemoryDictionary {
    fn filter(&self, language: &LanguageCode, query: &str) -> AppResult<Vec<SearchResult>> {
        let Some(index) = self.indices.get(language) else {
            return Err(AppError::unsupported(format!(
                "no index for language '{language}'"
            )));
        };

        let folded = fold_query(language, query.trim());
        if folded.is_empty() {
            return Ok(Vec::new());
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for entry in &index.entries {
            if entry.folded.starts_with(&folded) {
                prefix.push(entry.result);
            } else if entry.folded.contains(&folded) {
                contains.push(entry.result);
            }
        }

        prefix.extend(contains);
        prefix.truncate(self.max_results);
        Ok(prefix)
    }
}

impl LanguageCatalog for MemoryDictionary {
    fn language_name(&self, code: &LanguageCode) -> String {
        self.languages
            .iter()
            .find(|(entry, _)| entry == code)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    fn languages(&self) -> Vec<LanguageCode> {
        self.languages.iter().map(|(code, _)| code.clone()).collect()
    }
}

impl ArticleSource for MemoryDictionary {
    fn article(&self, id: ArticleId) -> Option<Article> {
        self.articles.get(&id).cloned()
    }

    fn headword(
        &self,
        language: &LanguageCode,
        result: &SearchResult,
        query: &str,
    ) -> Option<String> {
        let folded = fold_query(language, query.trim());
        self.indices
            .get(language)
            .and_then(|index| index.headword(result, &folded))
            .map(|entry| entry.word.clone())
            .or_else(|| self.articles.get(&result.article).map(|a| a.title.clone()))
    }
}

/// Lowercases `text`; Esperanto input additionally accepts the x-system
/// (`cx` for `ĉ`, `ux` for `ŭ`, ...).
pub fn fold_query(language: &LanguageCode, text: &str) -> String {
    let lower = text.to_lowercase();
    if !language.is_default() {
        return lower;
    }

    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();
    while let Some(ch) = chars.next() {
        let hatted = match ch {
            'c' => Some('ĉ'),
            'g' => Some('ĝ'),
            'h' => Some('ĥ'),
            'j' => Some('ĵ'),
            's' => Some('ŝ'),
            'u' => Some('ŭ'),
            _ => None,
        };
        match hatted {
            Some(hatted) if chars.peek() == Some(&'x') => {
                chars.next();
                out.push(hatted);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::catalog::LanguageCatalog;
    use crate::dictionary::{ArticleSource, DictionaryFilter};
    use crate::model::{ArticleId, LanguageCode, MarkId, SearchResult};

    use super::{MemoryDictionary, fold_query};

    fn sample() -> MemoryDictionary {
        MemoryDictionary::sample().expect("sample dictionary should parse")
    }

    fn titles(dict: &MemoryDictionary, language: &str, query: &str) -> Vec<String> {
        let language = LanguageCode::from(language);
        dict.filter(&language, query)
            .expect("filter should succeed")
            .iter()
            .map(|result| {
                dict.headword(&language, result, query)
                    .expect("result should have a headword")
            })
            .collect()
    }

    #[test]
    fn sample_catalog_lists_languages_in_file_order() {
        let dict = sample();
        let codes: Vec<String> = dict.languages().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, vec!["eo", "en", "fr", "de"]);
        assert_eq!(dict.language_name(&LanguageCode::from("de")), "German");
    }

    #[test]
    fn prefix_matches_come_before_substring_matches() {
        let dict = sample();
        assert_eq!(
            titles(&dict, "eo", "tag"),
            vec!["tagmanĝo", "tago", "ĉiutaga"]
        );
    }

    #[test]
    fn x_system_folds_to_circumflex_letters() {
        assert_eq!(fold_query(&LanguageCode::from("eo"), "CXevalo"), "ĉevalo");
        assert_eq!(fold_query(&LanguageCode::from("eo"), "auxto"), "aŭto");
        assert_eq!(fold_query(&LanguageCode::from("en"), "cxx"), "cxx");

        let dict = sample();
        assert_eq!(titles(&dict, "eo", "sxip"), vec!["ŝipo"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let dict = sample();
        assert_eq!(titles(&dict, "de", "hun"), vec!["Hund"]);
        assert_eq!(titles(&dict, "en", "DOG"), vec!["dog"]);
    }

    #[test]
    fn empty_query_returns_no_results() {
        let dict = sample();
        assert!(titles(&dict, "en", "   ").is_empty());
    }

    #[test]
    fn results_carry_article_and_mark() {
        let dict = sample();
        let results = dict
            .filter(&LanguageCode::from("en"), "cur")
            .expect("filter should succeed");
        assert_eq!(results, vec![SearchResult::new(ArticleId(0), MarkId(1))]);
    }

    #[test]
    fn max_results_caps_the_sequence() {
        let dict = sample().with_max_results(1);
        assert_eq!(titles(&dict, "eo", "o").len(), 1);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let dict = sample();
        assert!(dict.filter(&LanguageCode::from("xx"), "a").is_err());
    }

    #[test]
    fn index_pointing_at_missing_article_is_rejected() {
        let raw = r#"{
            "languages": [{ "code": "eo", "name": "Esperanto" }],
            "articles": [],
            "index": { "eo": [{ "word": "hundo", "article": 4 }] }
        }"#;
        assert!(MemoryDictionary::from_json(raw, "inline").is_err());
    }

    #[test]
    fn synonyms_of_one_sense_show_the_word_that_matched() {
        let raw = r#"{
            "languages": [{ "code": "en", "name": "English" }],
            "articles": [{ "id": 0, "title": "hundo", "senses": ["Dombesto."] }],
            "index": { "en": [
                { "word": "dog", "article": 0 },
                { "word": "hound", "article": 0 }
            ] }
        }"#;
        let dict = MemoryDictionary::from_json(raw, "inline").expect("inline dictionary");
        assert_eq!(titles(&dict, "en", "hou"), vec!["hound"]);
        assert_eq!(titles(&dict, "en", "do"), vec!["dog"]);
        // "un" only occurs inside "hound".
        assert_eq!(titles(&dict, "en", "un"), vec!["hound"]);

        let english = LanguageCode::from("en");
        let sense = SearchResult::new(ArticleId(0), MarkId(0));
        assert_eq!(dict.headword(&english, &sense, "").as_deref(), Some("dog"));
    }

    #[test]
    fn article_lookup_exposes_senses_by_mark() {
        let dict = sample();
        let article = dict.article(ArticleId(2)).expect("tago should exist");
        assert_eq!(article.title, "tago");
        assert_eq!(article.sense(MarkId(1)), Some("Daŭro de dudek kvar horoj."));
        assert_eq!(article.sense(MarkId(9)), None);
    }
}
