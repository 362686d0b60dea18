use ratatui::Frame;

use crate::catalog::LanguageCatalog;
use crate::dictionary::ArticleSource;
use crate::menu::MenuAction;
use crate::ui::{
    ArticleView, MenuChipView, ResultRowView, SearchView, draw_about_overlay, draw_article,
    draw_search,
};

use super::core::{APP_TITLE, App};
use super::state::Mode;

impl App {
    pub(crate) fn search_view(&self) -> SearchView {
        let controller = &self.search.controller;
        let rows = match controller.session() {
            Some(session) => controller
                .results()
                .iter()
                .map(|result| {
                    let headword = self
                        .dictionary
                        .headword(session.language(), result, session.query())
                        .unwrap_or_else(|| format!("#{}", result.article.0));
                    let detail = self
                        .dictionary
                        .article(result.article)
                        .map(|article| article.title)
                        .filter(|title| *title != headword);
                    ResultRowView { headword, detail }
                })
                .collect(),
            None => Vec::new(),
        };

        let chips = self
            .search
            .menu
            .iter()
            .enumerate()
            .map(|(idx, action)| {
                let key = format!("F{}", idx + 1);
                match action {
                    MenuAction::Language(entry) => MenuChipView {
                        key,
                        label: entry.label.clone(),
                        code: Some(entry.target_language.to_string()),
                        emphasized: entry.emphasized,
                    },
                    MenuAction::Shell(shell) => MenuChipView {
                        key,
                        label: shell.label().to_string(),
                        code: None,
                        emphasized: false,
                    },
                }
            })
            .collect();

        let status = controller
            .status_segment()
            .or_else(|| {
                (!self.state.status.message.is_empty()).then(|| self.state.status.message.clone())
            })
            .unwrap_or_default();

        SearchView {
            title: controller.title(APP_TITLE),
            input: self.search.sink.input.value().to_string(),
            cursor: self.search.sink.input.cursor(),
            caret_visible: self.search.sink.focused && self.search.sink.soft_input,
            chips,
            rows,
            selected: self.search.selected,
            status,
        }
    }

    pub(crate) fn article_view(&self) -> Option<ArticleView> {
        self.article.as_ref().map(|screen| ArticleView {
            title: screen.article.title.clone(),
            senses: screen.article.senses.clone(),
            mark: screen.mark.0 as usize,
            first_sense: screen.first_sense,
        })
    }

    pub(crate) fn draw_frame(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        match self.article_view() {
            Some(view) if self.state.mode != Mode::Search => draw_article(frame, area, &view),
            _ => draw_search(frame, area, &self.search_view()),
        }
        if self.state.mode == Mode::About {
            draw_about_overlay(frame, area, APP_TITLE, self.dictionary.languages().len());
        }
    }
}
