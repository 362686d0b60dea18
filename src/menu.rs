use crate::catalog::LanguageCatalog;
use crate::model::{LanguageCode, MenuEntry};
use crate::navigation::ShellAction;

pub const DEFAULT_MENU_MAX_LANGUAGES: usize = 3;

const ESPERANTO_LABEL: &str = "Search in Esperanto";

/// Everything a search screen's options menu can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Reopen the search screen for another language.
    Language(MenuEntry),
    Shell(ShellAction),
}

/// Alternative-language entries for the search menu.
///
/// `max` counts the whole menu budget; one slot is kept for the screen's own
/// items, so at most `max - 1` languages are returned. Unless the active
/// language is the default one, the default is pinned first.
pub fn build_language_menu(
    catalog: &dyn LanguageCatalog,
    active: Option<&LanguageCode>,
    max: usize,
    emphasized: bool,
) -> Vec<MenuEntry> {
    let mut slots = max.saturating_sub(1);
    let mut entries = Vec::with_capacity(slots);
    if slots == 0 {
        return entries;
    }

    let active_is_default = active.is_some_and(LanguageCode::is_default);
    if !active_is_default {
        entries.push(menu_entry(catalog, LanguageCode::default_language(), emphasized));
        slots -= 1;
    }

    for language in catalog.languages() {
        if slots == 0 {
            break;
        }
        if language.is_default() || active == Some(&language) {
            continue;
        }
        entries.push(menu_entry(catalog, language, emphasized));
        slots -= 1;
    }

    entries
}

pub fn language_label(catalog: &dyn LanguageCatalog, language: &LanguageCode) -> String {
    if language.is_default() {
        ESPERANTO_LABEL.to_string()
    } else {
        format!("Search in {}", catalog.language_name(language))
    }
}

fn menu_entry(
    catalog: &dyn LanguageCatalog,
    language: LanguageCode,
    emphasized: bool,
) -> MenuEntry {
    MenuEntry {
        label: language_label(catalog, &language),
        target_language: language,
        emphasized,
    }
}
