//! Effect metadata and UI language.

/// UI language.
///
/// Chinese is the default; English texts fall back to Chinese when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Chinese,
    English,
}

impl Language {
    /// Parse a language code as stored in the preference file.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "zh" => Some(Language::Chinese),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Chinese => "zh",
            Language::English => "en",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::Chinese => Language::English,
            Language::English => Language::Chinese,
        }
    }
}

/// Descriptive data for one effect.
///
/// `id` is the stable kebab-case key used by the registry; everything else is
/// presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectMetadata {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub description_en: String,
    pub long_description: String,
    pub author: String,
    pub version: String,
    pub tags: Vec<String>,
}

impl EffectMetadata {
    /// Metadata with the required fields; the rest default to empty.
    pub fn new(id: &str, name: &str, name_en: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            name_en: name_en.to_string(),
            author: "SymbolMove".to_string(),
            version: "1.0.0".to_string(),
            ..Self::default()
        }
    }

    pub fn description(mut self, zh: &str, en: &str) -> Self {
        self.description = zh.to_string();
        self.description_en = en.to_string();
        self
    }

    pub fn long_description(mut self, text: &str) -> Self {
        self.long_description = text.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn display_name(&self, lang: Language) -> &str {
        localized(&self.name, &self.name_en, lang)
    }

    pub fn display_description(&self, lang: Language) -> &str {
        localized(&self.description, &self.description_en, lang)
    }
}

fn localized<'a>(zh: &'a str, en: &'a str, lang: Language) -> &'a str {
    if lang == Language::English && !en.is_empty() {
        en
    } else {
        zh
    }
}
