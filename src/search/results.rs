use std::sync::Arc;

use crate::model::SearchResult;

/// Ordered results shown by the list view.
///
/// The sequence is only ever swapped as a whole. Every swap bumps the
/// revision; the app polls `take_changed` after collecting completions to
/// decide whether the selection is stale.
#[derive(Debug, Clone)]
pub struct ResultList {
    results: Arc<[SearchResult]>,
    revision: u64,
    seen_revision: u64,
}

impl Default for ResultList {
    fn default() -> Self {
        Self {
            results: Arc::from(Vec::new()),
            revision: 0,
            seen_revision: 0,
        }
    }
}

impl ResultList {
    pub fn replace_results(&mut self, results: impl Into<Arc<[SearchResult]>>) {
        self.results = results.into();
        self.revision = self.revision.wrapping_add(1);
    }

    /// Empties the list. Returns false when it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.results.is_empty() {
            return false;
        }
        self.replace_results(Vec::new());
        true
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.results.get(index)
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn as_slice(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn take_changed(&mut self) -> bool {
        let changed = self.seen_revision != self.revision;
        self.seen_revision = self.revision;
        changed
    }
}
