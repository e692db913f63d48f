//! Current UI language, shared between the menu and the main loop.

use std::path::PathBuf;

use log::info;
use parking_lot::RwLock;

use crate::config::{self, ConfigError};
use crate::translations::{translate, TextKey};
use crate::types::{EffectMetadata, Language};

pub struct LanguageManager {
    current: RwLock<Language>,
    path: Option<PathBuf>,
}

impl LanguageManager {
    /// Chinese, not backed by a file.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Language::default()),
            path: None,
        }
    }

    /// Load the preference stored at `path`; saves go to the same place.
    pub fn with_path(path: PathBuf) -> Self {
        let lang = config::load_language(&path).unwrap_or_default();
        Self {
            current: RwLock::new(lang),
            path: Some(path),
        }
    }

    /// Backed by `~/.symbolmove/config.json` when a home directory exists.
    pub fn load_default() -> Self {
        match config::default_config_path() {
            Some(path) => Self::with_path(path),
            None => Self::new(),
        }
    }

    pub fn current(&self) -> Language {
        *self.current.read()
    }

    pub fn set(&self, lang: Language) {
        *self.current.write() = lang;
    }

    pub fn toggle(&self) -> Language {
        let mut current = self.current.write();
        *current = current.toggled();
        *current
    }

    /// Toggle and persist. The new language stays active even when saving fails.
    pub fn toggle_and_save(&self) -> Result<Language, ConfigError> {
        let lang = self.toggle();
        info!("language switched to {}", lang.code());
        self.save()?;
        Ok(lang)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NoHome)?;
        config::save_language(path, self.current())
    }

    pub fn text(&self, key: TextKey) -> &'static str {
        translate(self.current(), key)
    }

    pub fn effect_name<'a>(&self, meta: &'a EffectMetadata) -> &'a str {
        meta.display_name(self.current())
    }

    pub fn effect_description<'a>(&self, meta: &'a EffectMetadata) -> &'a str {
        meta.display_description(self.current())
    }
}

impl Default for LanguageManager {
    fn default() -> Self {
        Self::new()
    }
}
