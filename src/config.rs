use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dictionary::DEFAULT_MAX_RESULTS;
use crate::error::{AppError, AppResult};
use crate::menu::DEFAULT_MENU_MAX_LANGUAGES;
use crate::model::LanguageCode;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub ui: UiConfig,
    pub keymap: KeymapConfig,
    pub log: LogConfig,
    pub dictionary: DictionaryConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub default_language: String,
    pub menu_max_languages: usize,
    pub max_results: usize,
    pub cache_entries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::DEFAULT.to_string(),
            menu_max_languages: DEFAULT_MENU_MAX_LANGUAGES,
            max_results: DEFAULT_MAX_RESULTS,
            cache_entries: 128,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShowAsAction {
    /// Ask the terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub poll_interval_ms: u64,
    pub show_as_action: ShowAsAction,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16,
            show_as_action: ShowAsAction::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DictionaryConfig {
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let trimmed = self.search.default_language.trim();
        if trimmed.is_empty() {
            self.search.default_language = SearchConfig::default().default_language;
        } else {
            self.search.default_language = trimmed.to_string();
        }
        self.search.max_results = self.search.max_results.max(1);
        self.ui.poll_interval_ms = self.ui.poll_interval_ms.clamp(1, 1000);
        if self.log.filter.trim().is_empty() {
            self.log.filter = LogConfig::default().filter;
        }
        self
    }

    pub fn default_language(&self) -> LanguageCode {
        LanguageCode::new(self.search.default_language.clone())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("PREVO_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("prevo").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("prevo")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("prevo").join("config.toml"));
    }
    None
}
