mod memory;
mod traits;

pub use memory::{DEFAULT_MAX_RESULTS, MemoryDictionary, fold_query};
pub use traits::{Article, ArticleSource, DictionaryFilter};
