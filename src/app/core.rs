use std::sync::Arc;

use crate::capability::ActionCapability;
use crate::config::Config;
use crate::dictionary::MemoryDictionary;
use crate::error::AppResult;
use crate::input::KeymapPreset;
use crate::model::LanguageCode;
use crate::search::FilterService;

use super::screen::{ArticleScreen, SearchScreen};
use super::state::AppState;

pub const APP_TITLE: &str = "PReVo";

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub(crate) dictionary: Arc<MemoryDictionary>,
    pub(crate) filter: Box<dyn FilterService>,
    pub(crate) capability: Arc<ActionCapability>,
    pub(crate) keymap: KeymapPreset,
    pub(crate) search: SearchScreen,
    pub(crate) article: Option<ArticleScreen>,
}

impl App {
    pub fn new(
        config: Config,
        dictionary: Arc<MemoryDictionary>,
        mut filter: Box<dyn FilterService>,
        capability: Arc<ActionCapability>,
        language: Option<LanguageCode>,
        search_term: Option<&str>,
    ) -> AppResult<Self> {
        let search = SearchScreen::open(
            Arc::clone(&capability),
            config.search.menu_max_languages,
            language,
            search_term,
            dictionary.as_ref(),
            filter.as_mut(),
        )?;
        let keymap = KeymapPreset::parse(&config.keymap.preset);

        Ok(Self {
            state: AppState::default(),
            config,
            dictionary,
            filter,
            capability,
            keymap,
            search,
            article: None,
        })
    }

    pub fn search(&self) -> &SearchScreen {
        &self.search
    }

    pub fn article(&self) -> Option<&ArticleScreen> {
        self.article.as_ref()
    }

    /// Replaces the search screen; the old session is closed first.
    pub(crate) fn open_search(
        &mut self,
        language: LanguageCode,
        search_term: Option<&str>,
    ) -> AppResult<()> {
        self.search.controller.on_screen_closed(self.filter.as_mut());
        self.search = SearchScreen::open(
            Arc::clone(&self.capability),
            self.config.search.menu_max_languages,
            Some(language),
            search_term,
            self.dictionary.as_ref(),
            self.filter.as_mut(),
        )?;
        Ok(())
    }

    /// Collects filter completions. Returns true when anything visible changed.
    pub(crate) fn drain_background(&mut self) -> bool {
        let applied = self.search.controller.on_background(self.filter.as_mut());
        let list_changed = self.search.controller.take_results_changed();
        if list_changed {
            self.search.reset_selection();
        }
        applied || list_changed
    }

    pub(crate) fn shutdown(&mut self) {
        self.search.controller.on_screen_closed(self.filter.as_mut());
    }
}
