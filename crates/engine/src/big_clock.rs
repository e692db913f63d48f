//! Large digital clock in five-row block digits.
//!
//! The wall clock is read once at init; after that the displayed time advances
//! by the frame deltas, so the simulation stays a pure function of its inputs.

use chrono::{Local, NaiveTime, TimeDelta};

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "big-clock";

pub const GLYPH_HEIGHT: usize = 5;
pub const GLYPH_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub color: Rgb,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: palette::LIGHT_BLUE,
            fps: 1,
        }
    }
}

/// Block glyph for a digit or `:`.
pub fn glyph(ch: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    Some(match ch {
        '0' => [" ███ ", "█   █", "█   █", "█   █", " ███ "],
        '1' => ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
        '2' => [" ███ ", "    █", " ███ ", "█    ", "█████"],
        '3' => [" ███ ", "    █", "  ██ ", "    █", " ███ "],
        '4' => ["█   █", "█   █", "█████", "    █", "    █"],
        '5' => ["█████", "█    ", "████ ", "    █", "████ "],
        '6' => [" ███ ", "█    ", "████ ", "█   █", " ███ "],
        '7' => ["█████", "    █", "   █ ", "  █  ", "  █  "],
        '8' => [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
        '9' => [" ███ ", "█   █", " ████", "    █", " ███ "],
        ':' => ["     ", "  █  ", "     ", "  █  ", "     "],
        _ => return None,
    })
}

pub struct BigClock {
    config: Config,
    width: u16,
    height: u16,
    start: NaiveTime,
    elapsed: f64,
}

impl BigClock {
    pub fn starting_at(width: u16, height: u16, config: Config, start: NaiveTime) -> Self {
        Self {
            config,
            width,
            height,
            start,
            elapsed: 0.0,
        }
    }

    pub fn now(&self) -> NaiveTime {
        self.start + TimeDelta::milliseconds((self.elapsed * 1000.0) as i64)
    }

    /// `HH:MM:SS`.
    pub fn display(&self) -> String {
        self.now().format("%H:%M:%S").to_string()
    }
}

impl Simulation for BigClock {
    fn update(&mut self, dt: f64) {
        // wrap at a day so the delta stays small
        self.elapsed = (self.elapsed + dt) % 86_400.0;
    }

    fn render(&self, surface: &mut dyn Surface) {
        let text = self.display();
        let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
        let total = (glyphs.len() * GLYPH_WIDTH) as i32;
        let x0 = (self.width as i32 - total) / 2;
        let y0 = (self.height as i32 - GLYPH_HEIGHT as i32) / 2;
        let style = CellStyle::fg(self.config.color).bold();

        for (n, rows) in glyphs.iter().enumerate() {
            let gx = x0 + (n * GLYPH_WIDTH) as i32;
            for (dy, row) in rows.iter().enumerate() {
                for (dx, ch) in row.chars().enumerate() {
                    if ch != ' ' {
                        surface.set_cell(gx + dx as i32, y0 + dy as i32, ch, style);
                    }
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "大字时钟", "Big Clock")
        .description("用大号字符显示的数字时钟", "Digital clock drawn in large block characters")
        .long_description("以五行高的方块字符居中显示当前时间，每秒刷新一次。")
        .tags(&["时钟", "实用", "字符"])
}

pub fn effect_with(config: Config) -> SimulationEffect<BigClock> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(BigClock::starting_at(w, h, config, Local::now().time()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
