//! Selector: the effect menu.
//!
//! State and key handling are separate from drawing; `render` is a pure
//! function of the state, the language and the surface size.

use crate::core::types::{palette, CellStyle, EffectMetadata, Language};
use crate::core::Surface;
use crate::i18n::{translate, TextKey};
use crate::input::Key;

const TITLE_Y: i32 = 2;
const LIST_Y: i32 = 6;
const ROW_STEP: i32 = 2;
/// Rows kept free below the list for the description and hints.
const FOOTER_ROWS: i32 = 8;

/// What the main loop should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Launch(String),
    ToggleLanguage,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    effects: Vec<EffectMetadata>,
    selected: usize,
}

impl Selector {
    pub fn new(effects: Vec<EffectMetadata>) -> Self {
        Self {
            effects,
            selected: 0,
        }
    }

    /// Replace the list, keeping the selection when it is still in range.
    pub fn refresh(&mut self, effects: Vec<EffectMetadata>) {
        self.effects = effects;
        if self.selected >= self.effects.len() {
            self.selected = 0;
        }
    }

    pub fn effects(&self) -> &[EffectMetadata] {
        &self.effects
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&EffectMetadata> {
        self.effects.get(self.selected)
    }

    pub fn move_up(&mut self) {
        if self.effects.is_empty() {
            return;
        }
        self.selected = match self.selected {
            0 => self.effects.len() - 1,
            n => n - 1,
        };
    }

    pub fn move_down(&mut self) {
        if self.effects.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.effects.len();
    }

    pub fn handle_key(&mut self, key: Key) -> MenuAction {
        match key {
            Key::Quit => MenuAction::Quit,
            Key::ToggleLanguage => MenuAction::ToggleLanguage,
            Key::Up => {
                self.move_up();
                MenuAction::None
            }
            Key::Down => {
                self.move_down();
                MenuAction::None
            }
            Key::Enter => self.launch_selected(),
            Key::Digit(d) => {
                // 1-9 pick the first nine, 0 the tenth
                let idx = if d == 0 { 9 } else { d as usize - 1 };
                if idx < self.effects.len() {
                    self.selected = idx;
                    self.launch_selected()
                } else {
                    MenuAction::None
                }
            }
            Key::Esc | Key::Other => MenuAction::None,
        }
    }

    fn launch_selected(&self) -> MenuAction {
        match self.selected() {
            Some(meta) => MenuAction::Launch(meta.id.clone()),
            None => MenuAction::None,
        }
    }

    /// Number of list rows that fit on a screen of `height` rows.
    pub fn visible_rows(height: u16) -> usize {
        let limit = height as i32 - FOOTER_ROWS;
        if limit <= LIST_Y {
            return 0;
        }
        ((limit - LIST_Y + ROW_STEP - 1) / ROW_STEP) as usize
    }

    /// Index of the first listed effect, scrolled so the selection is visible.
    pub fn first_visible(&self, height: u16) -> usize {
        let rows = Self::visible_rows(height);
        if rows == 0 || self.selected < rows {
            0
        } else {
            self.selected + 1 - rows
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, lang: Language) {
        surface.clear();
        let (width, height) = surface.size();
        self.render_title(surface, lang, width);
        self.render_list(surface, lang, width, height);
        self.render_description(surface, lang, width, height);
        render_hints(surface, lang, width, height);
    }

    fn render_title(&self, surface: &mut dyn Surface, lang: Language, width: u16) {
        surface.put_str_centered(
            TITLE_Y,
            translate(lang, TextKey::Title),
            CellStyle::fg(palette::LIGHT_GREEN).bold(),
        );
        surface.put_str_centered(TITLE_Y + 1, translate(lang, TextKey::Subtitle), CellStyle::fg(palette::GREEN));
        horizontal_line(surface, TITLE_Y + 3, width);

        let indicator = format!("[{}]", translate(lang, TextKey::LanguageIndicator));
        let x = width as i32 - indicator.chars().count() as i32 - 1;
        surface.put_str(x, 0, &indicator, CellStyle::fg(palette::GRAY));
    }

    fn render_list(&self, surface: &mut dyn Surface, lang: Language, width: u16, height: u16) {
        if self.effects.is_empty() {
            surface.put_str_centered(LIST_Y + 2, translate(lang, TextKey::NoEffects), CellStyle::fg(palette::GRAY));
            return;
        }

        let x = width as i32 / 2 - 20;
        let first = self.first_visible(height);
        let rows = Self::visible_rows(height);
        for (row, (i, meta)) in self.effects.iter().enumerate().skip(first).take(rows).enumerate() {
            let y = LIST_Y + row as i32 * ROW_STEP;
            let name = meta.display_name(lang);
            if i == self.selected {
                let style = CellStyle::fg(palette::BLACK).with_bg(palette::LIGHT_GREEN).bold();
                surface.put_str(x, y, &format!("► {}. {}", i + 1, name), style);
            } else {
                surface.put_str(x, y, &format!("  {}. {}", i + 1, name), CellStyle::fg(palette::WHITE));
            }
        }
    }

    fn render_description(&self, surface: &mut dyn Surface, lang: Language, width: u16, height: u16) {
        let Some(meta) = self.selected() else {
            return;
        };
        let y = height as i32 - 6;
        horizontal_line(surface, y - 1, width);

        let label = translate(lang, TextKey::DescLabel);
        surface.put_str(4, y, label, CellStyle::fg(palette::YELLOW));

        let x = 4 + label.chars().count() as i32 + 1;
        let desc = truncate(meta.display_description(lang), (width as i32 - x - 2).max(0) as usize);
        surface.put_str(x, y, &desc, CellStyle::fg(palette::WHITE));
    }
}

fn render_hints(surface: &mut dyn Surface, lang: Language, width: u16, height: u16) {
    let y = height as i32 - 2;
    horizontal_line(surface, y - 1, width);
    surface.put_str_centered(y, translate(lang, TextKey::Hints), CellStyle::fg(palette::GRAY));
}

fn horizontal_line(surface: &mut dyn Surface, y: i32, width: u16) {
    surface.put_str(0, y, &"─".repeat(width as usize), CellStyle::fg(palette::GRAY));
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
