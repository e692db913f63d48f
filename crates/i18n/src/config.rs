//! Persisted language preference.
//!
//! ```json
//! { "language": "zh", "version": "1.0" }
//! ```
//!
//! Reading never fails: a missing, unreadable or malformed file means "use
//! the default".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Language;

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    NoHome,
    #[error("config io: {0}")]
    Io(#[from] io::Error),
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub language: String,
    pub version: String,
}

impl Preference {
    pub fn new(lang: Language) -> Self {
        Self {
            language: lang.code().to_string(),
            version: CONFIG_VERSION.to_string(),
        }
    }
}

/// `~/.symbolmove/config.json`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".symbolmove").join("config.json"))
}

/// Stored language, or `None` when the file is absent or unusable.
pub fn load_language(path: &Path) -> Option<Language> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            debug!("no language preference at {}: {err}", path.display());
            return None;
        }
    };
    let pref: Preference = match serde_json::from_str(&data) {
        Ok(pref) => pref,
        Err(err) => {
            warn!("ignoring malformed {}: {err}", path.display());
            return None;
        }
    };
    Language::from_code(&pref.language)
}

/// Write the preference, creating the parent directory.
pub fn save_language(path: &Path, lang: Language) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = serde_json::to_string_pretty(&Preference::new(lang))?;
    fs::write(path, data)?;
    debug!("saved language {} to {}", lang.code(), path.display());
    Ok(())
}
