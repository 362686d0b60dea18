use crate::model::LanguageCode;

/// Resolves the languages a dictionary can be searched in.
pub trait LanguageCatalog {
    /// Human-readable name. Unknown codes fall back to the code itself.
    fn language_name(&self, code: &LanguageCode) -> String;

    /// Languages in catalog order.
    fn languages(&self) -> Vec<LanguageCode>;
}

/// Fixed list of `(code, name)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    entries: Vec<(LanguageCode, String)>,
}

impl StaticCatalog {
    pub fn new<I, C, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, name)| (LanguageCode::new(code), name.into()))
                .collect(),
        }
    }

    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(codes.into_iter().map(|code| (code, code)))
    }
}

impl LanguageCatalog for StaticCatalog {
    fn language_name(&self, code: &LanguageCode) -> String {
        self.entries
            .iter()
            .find(|(entry, _)| entry == code)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    fn languages(&self) -> Vec<LanguageCode> {
        self.entries.iter().map(|(code, _)| code.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::LanguageCode;

    use super::{LanguageCatalog, StaticCatalog};

    #[test]
    fn static_catalog_keeps_order_and_falls_back_to_code() {
        let catalog = StaticCatalog::new([("en", "English"), ("fr", "French")]);
        assert_eq!(
            catalog.languages(),
            vec![LanguageCode::from("en"), LanguageCode::from("fr")]
        );
        assert_eq!(catalog.language_name(&LanguageCode::from("fr")), "French");
        assert_eq!(catalog.language_name(&LanguageCode::from("xx")), "xx");
    }
}
