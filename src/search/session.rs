use crate::model::LanguageCode;

use super::engine::{FilterTicket, SessionId};
use super::results::ResultList;

/// State of one search screen instance. The language is fixed for its
/// whole lifetime.
#[derive(Debug, Clone)]
pub struct SearchSession {
    id: SessionId,
    language: LanguageCode,
    pub(crate) query: String,
    pub(crate) results: ResultList,
    /// Latest submission; only its completion may replace `results`.
    pub(crate) pending: Option<FilterTicket>,
    pub(crate) last_error: Option<String>,
}

impl SearchSession {
    pub fn new(id: SessionId, language: LanguageCode) -> Self {
        Self {
            id,
            language,
            query: String::new(),
            results: ResultList::default(),
            pending: None,
            last_error: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultList {
        &mut self.results
    }

    pub fn pending(&self) -> Option<FilterTicket> {
        self.pending
    }

    pub fn is_filtering(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
