use crate::dictionary::ArticleSource;
use crate::error::AppResult;
use crate::navigation::{NavigationRequest, ShellAction};

use super::core::App;
use super::screen::ArticleScreen;
use super::state::Mode;

impl App {
    /// Applies every request queued by the search screen. Returns true when
    /// the visible screen changed.
    pub(crate) fn process_navigation(&mut self) -> AppResult<bool> {
        let requests: Vec<NavigationRequest> = self.search.sink.navigation.drain(..).collect();
        let mut changed = false;
        for request in requests {
            changed |= self.apply_navigation(request)?;
        }
        Ok(changed)
    }

    fn apply_navigation(&mut self, request: NavigationRequest) -> AppResult<bool> {
        match request {
            NavigationRequest::OpenArticle { article, mark } => {
                let Some(found) = self.dictionary.article(article) else {
                    tracing::warn!(article = article.0, "article missing from dictionary");
                    self.state.status.message = format!("article {} not found", article.0);
                    return Ok(true);
                };
                self.state.status.message = found.title.clone();
                self.article = Some(ArticleScreen::new(found, mark));
                self.state.mode = Mode::Article;
            }
            NavigationRequest::OpenSearch {
                language,
                search_term,
            } => {
                tracing::info!(%language, "switching search language");
                self.open_search(language, search_term.as_deref())?;
                self.article = None;
                self.state.mode = Mode::Search;
                self.state.status.message.clear();
            }
            NavigationRequest::Shell(ShellAction::About) => {
                self.state.mode = Mode::About;
            }
            NavigationRequest::Shell(ShellAction::Quit) => {
                self.state.quit_requested = true;
            }
        }
        Ok(true)
    }
}
