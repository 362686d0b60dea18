use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

/// `None` in search mode means the key belongs to the text field.
pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return Some(Command::Quit);
    }

    match mode {
        Mode::Search => match preset {
            KeymapPreset::Default => map_search_key_default(key),
            KeymapPreset::Emacs => map_search_key_emacs(key),
        },
        Mode::Article => map_article_key(key),
        Mode::About => Some(Command::Back),
    }
}

fn map_search_key_default(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up => Some(Command::SelectPrev),
        KeyCode::Down => Some(Command::SelectNext),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        KeyCode::Enter => Some(Command::Activate),
        KeyCode::F(10) => Some(Command::About),
        KeyCode::F(n @ 1..=9) => Some(Command::Menu(usize::from(n) - 1)),
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn map_search_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::SelectNext),
            KeyCode::Char('p') => Some(Command::SelectPrev),
            KeyCode::Char('g') => Some(Command::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::PageUp),
            KeyCode::Char(ch @ '1'..='9') => Some(Command::Menu(ch as usize - '1' as usize)),
            _ => None,
        };
    }

    map_search_key_default(key)
}

fn map_article_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => Some(Command::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectNext),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        _ => None,
    }
}
