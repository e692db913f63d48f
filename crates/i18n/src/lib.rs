//! UI language selection and the persisted language preference.
//!
//! Effects carry their own Chinese and English names in
//! [`EffectMetadata`](types::EffectMetadata); this crate covers the menu
//! chrome (title, hints, labels) and remembers the user's choice in
//! `~/.symbolmove/config.json`.

pub mod config;
pub mod manager;
pub mod translations;

pub use symbol_move_types as types;
pub use symbol_move_types::Language;

pub use config::{default_config_path, load_language, save_language, ConfigError, Preference};
pub use manager::LanguageManager;
pub use translations::{translate, TextKey};
