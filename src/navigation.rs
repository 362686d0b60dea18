use crate::model::{ArticleId, LanguageCode, MarkId};

/// Menu items owned by the hosting shell rather than the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    About,
    Quit,
}

impl ShellAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    OpenArticle {
        article: ArticleId,
        mark: MarkId,
    },
    /// Open a fresh search screen. `search_term` seeds its text field.
    OpenSearch {
        language: LanguageCode,
        search_term: Option<String>,
    },
    Shell(ShellAction),
}

/// Display side of a search screen: its text field and the navigator.
pub trait DisplaySink {
    fn navigate(&mut self, request: NavigationRequest);

    /// Replaces the text field contents without emitting an edit event.
    fn set_field_text(&mut self, text: &str);

    fn field_text(&self) -> String;

    fn focus_field(&mut self);

    fn request_soft_input(&mut self);
}
