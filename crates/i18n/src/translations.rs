//! Menu texts in both languages.

use std::fmt;
use std::str::FromStr;

use crate::types::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Subtitle,
    DescLabel,
    Hints,
    LanguageIndicator,
    ErrorTitle,
    PressAnyKey,
    NoEffects,
}

impl TextKey {
    pub const ALL: [TextKey; 8] = [
        TextKey::Title,
        TextKey::Subtitle,
        TextKey::DescLabel,
        TextKey::Hints,
        TextKey::LanguageIndicator,
        TextKey::ErrorTitle,
        TextKey::PressAnyKey,
        TextKey::NoEffects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextKey::Title => "title",
            TextKey::Subtitle => "subtitle",
            TextKey::DescLabel => "desc_label",
            TextKey::Hints => "hints",
            TextKey::LanguageIndicator => "lang_indicator",
            TextKey::ErrorTitle => "error_title",
            TextKey::PressAnyKey => "press_any_key",
            TextKey::NoEffects => "no_effects",
        }
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextKey::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

pub fn translate(lang: Language, key: TextKey) -> &'static str {
    match lang {
        Language::Chinese => match key {
            TextKey::Title => "符动世界(SymbolMove)",
            TextKey::Subtitle => "字符符号在动，创造世界",
            TextKey::DescLabel => "描述:",
            TextKey::Hints => {
                "↑↓←→:选择 | Enter:确认 | 1-9/0:快捷键 | Ctrl+Space:切换语言 | q/Ctrl+C:退出"
            }
            TextKey::LanguageIndicator => "中文",
            TextKey::ErrorTitle => "错误",
            TextKey::PressAnyKey => "按任意键继续...",
            TextKey::NoEffects => "暂无可用特效",
        },
        Language::English => match key {
            TextKey::Title => "SymbolMove",
            TextKey::Subtitle => "Characters in Motion, Creating Worlds",
            TextKey::DescLabel => "Description:",
            TextKey::Hints => {
                "↑↓←→:Select | Enter:Confirm | 1-9/0:Shortcut | Ctrl+Space:Switch Lang | q/Ctrl+C:Quit"
            }
            TextKey::LanguageIndicator => "English",
            TextKey::ErrorTitle => "Error",
            TextKey::PressAnyKey => "Press any key to continue...",
            TextKey::NoEffects => "No effects available",
        },
    }
}
