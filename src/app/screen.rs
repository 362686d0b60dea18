use std::collections::VecDeque;
use std::sync::Arc;

use tui_input::Input;

use crate::capability::ActionCapability;
use crate::catalog::LanguageCatalog;
use crate::dictionary::Article;
use crate::error::AppResult;
use crate::menu::MenuAction;
use crate::model::{LanguageCode, MarkId};
use crate::navigation::{DisplaySink, NavigationRequest, ShellAction};
use crate::search::{FilterService, SearchController};

/// Text field and navigation outbox of one search screen.
#[derive(Debug, Default)]
pub struct ScreenSink {
    pub input: Input,
    pub focused: bool,
    pub soft_input: bool,
    pub navigation: VecDeque<NavigationRequest>,
}

impl DisplaySink for ScreenSink {
    fn navigate(&mut self, request: NavigationRequest) {
        self.navigation.push_back(request);
    }

    fn set_field_text(&mut self, text: &str) {
        self.input = Input::new(text.to_string());
    }

    fn field_text(&self) -> String {
        self.input.value().to_string()
    }

    fn focus_field(&mut self) {
        self.focused = true;
    }

    fn request_soft_input(&mut self) {
        // Terminals have no on-screen keyboard; showing the caret is the closest thing.
        self.soft_input = true;
    }
}

pub struct SearchScreen {
    pub controller: SearchController,
    pub sink: ScreenSink,
    pub selected: usize,
    pub menu: Vec<MenuAction>,
}

impl SearchScreen {
    pub fn open(
        capability: Arc<ActionCapability>,
        menu_max_languages: usize,
        language: Option<LanguageCode>,
        search_term: Option<&str>,
        catalog: &dyn LanguageCatalog,
        filter: &mut dyn FilterService,
    ) -> AppResult<Self> {
        let mut controller = SearchController::new(capability, menu_max_languages);
        let mut sink = ScreenSink::default();
        controller.on_screen_opened(language, search_term, filter, &mut sink)?;
        controller.on_screen_resumed(&mut sink);

        let mut menu: Vec<MenuAction> = controller
            .build_language_menu(catalog)
            .into_iter()
            .map(MenuAction::Language)
            .collect();
        menu.push(MenuAction::Shell(ShellAction::About));
        menu.push(MenuAction::Shell(ShellAction::Quit));

        Ok(Self {
            controller,
            sink,
            selected: 0,
            menu,
        })
    }

    pub fn select_by(&mut self, delta: isize) -> bool {
        let count = self.controller.count();
        if count == 0 {
            self.selected = 0;
            return false;
        }
        let next = self
            .selected
            .saturating_add_signed(delta)
            .min(count.saturating_sub(1));
        let moved = next != self.selected;
        self.selected = next;
        moved
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleScreen {
    pub article: Article,
    pub mark: MarkId,
    /// Sense drawn at the top of the view. Opens on the marked one.
    pub first_sense: usize,
}

impl ArticleScreen {
    pub fn new(article: Article, mark: MarkId) -> Self {
        let last = article.senses.len().saturating_sub(1);
        let first_sense = (mark.0 as usize).min(last);
        Self {
            article,
            mark,
            first_sense,
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let last = self.article.senses.len().saturating_sub(1);
        self.first_sense = self.first_sense.saturating_add_signed(delta).min(last);
    }
}
