//! Full-screen error message shown after a failed launch.

use crate::core::types::{palette, CellStyle, Language};
use crate::core::Surface;
use crate::i18n::{translate, TextKey};

pub fn render_error(surface: &mut dyn Surface, lang: Language, message: &str) {
    surface.clear();
    let (_, height) = surface.size();
    let y = height as i32 / 2;

    surface.put_str_centered(y - 1, translate(lang, TextKey::ErrorTitle), CellStyle::fg(palette::RED).bold());
    surface.put_str_centered(y + 1, message, CellStyle::fg(palette::WHITE));
    surface.put_str_centered(y + 3, translate(lang, TextKey::PressAnyKey), CellStyle::fg(palette::GRAY));
}
