use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tui_input::backend::crossterm::EventHandler;

use crate::command::{Command, CommandOutcome};
use crate::error::AppResult;
use crate::input::map_key_to_command_with_preset;
use crate::navigation::DisplaySink;

use super::core::App;
use super::state::Mode;

const PAGE_STEP: isize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct InputEventOutcome {
    pub redraw: bool,
    pub quit_requested: bool,
}

impl App {
    pub(crate) fn handle_input_event(&mut self, event: Event) -> AppResult<InputEventOutcome> {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key_event(key)
            }
            Event::Resize(_, _) => Ok(InputEventOutcome {
                redraw: true,
                quit_requested: false,
            }),
            _ => Ok(InputEventOutcome::default()),
        }
    }

    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) -> AppResult<InputEventOutcome> {
        let command = map_key_to_command_with_preset(key, self.state.mode, self.keymap);
        let redraw = match command {
            Some(command) => {
                self.state.status.last_command = Some(command);
                matches!(self.dispatch_command(command)?, CommandOutcome::Applied)
            }
            None if self.state.mode == Mode::Search => self.edit_query(key),
            None => false,
        };

        Ok(InputEventOutcome {
            redraw,
            quit_requested: self.state.quit_requested,
        })
    }

    /// Feeds a key to the text field and reports the edit to the controller.
    fn edit_query(&mut self, key: KeyEvent) -> bool {
        let before = self.search.sink.field_text();
        self.search.sink.input.handle_event(&Event::Key(key));
        let after = self.search.sink.field_text();
        if before == after {
            // Cursor movement only.
            return true;
        }
        self.search
            .controller
            .on_query_changed(&after, self.filter.as_mut());
        self.search.reset_selection();
        true
    }

    pub(crate) fn dispatch_command(&mut self, command: Command) -> AppResult<CommandOutcome> {
        let outcome = match (self.state.mode, command) {
            (_, Command::Quit) => {
                self.state.quit_requested = true;
                CommandOutcome::Applied
            }
            (Mode::Search, Command::SelectPrev) => moved(self.search.select_by(-1)),
            (Mode::Search, Command::SelectNext) => moved(self.search.select_by(1)),
            (Mode::Search, Command::PageUp) => moved(self.search.select_by(-PAGE_STEP)),
            (Mode::Search, Command::PageDown) => moved(self.search.select_by(PAGE_STEP)),
            (Mode::Search, Command::Activate) => {
                if self.search.controller.count() == 0 {
                    CommandOutcome::Noop
                } else {
                    let selected = self.search.selected;
                    self.search
                        .controller
                        .on_result_activated(selected, &mut self.search.sink)?;
                    self.process_navigation()?;
                    CommandOutcome::Applied
                }
            }
            (Mode::Search, Command::Menu(index)) => {
                let Some(action) = self.search.menu.get(index).cloned() else {
                    return Ok(CommandOutcome::Noop);
                };
                self.search
                    .controller
                    .on_menu_action_selected(&action, &mut self.search.sink);
                self.process_navigation()?;
                CommandOutcome::Applied
            }
            (Mode::Search, Command::About) => {
                self.state.mode = Mode::About;
                CommandOutcome::Applied
            }
            (Mode::Article, Command::SelectPrev) => self.scroll_article(-1),
            (Mode::Article, Command::SelectNext) => self.scroll_article(1),
            (Mode::Article, Command::PageUp) => self.scroll_article(-PAGE_STEP),
            (Mode::Article, Command::PageDown) => self.scroll_article(PAGE_STEP),
            (Mode::Article, Command::Back) => {
                self.article = None;
                self.state.mode = Mode::Search;
                self.search.controller.on_screen_resumed(&mut self.search.sink);
                CommandOutcome::Applied
            }
            (Mode::About, Command::Back) => {
                self.state.mode = if self.article.is_some() {
                    Mode::Article
                } else {
                    Mode::Search
                };
                CommandOutcome::Applied
            }
            _ => CommandOutcome::Noop,
        };
        tracing::debug!(command = command.id(), ?outcome, "command dispatched");
        Ok(outcome)
    }

    fn scroll_article(&mut self, delta: isize) -> CommandOutcome {
        match self.article.as_mut() {
            Some(article) => {
                article.scroll_by(delta);
                CommandOutcome::Applied
            }
            None => CommandOutcome::Noop,
        }
    }
}

fn moved(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Noop
    }
}
