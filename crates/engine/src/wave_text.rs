//! Text riding a sine wave with cycling hues.

use std::f64::consts::{FRAC_PI_4, TAU};

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "wave-text";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub text: String,
    /// Peak vertical offset in rows.
    pub amplitude: f64,
    /// Wave phase speed in rad/s.
    pub wave_speed: f64,
    /// Hue drift in degrees per second.
    pub color_speed: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text: "SymbolMove".to_string(),
            amplitude: 3.0,
            wave_speed: 2.0,
            color_speed: 1.0,
            fps: 30,
        }
    }
}

/// Six 60° hue bands.
pub fn hue_color(hue: f64) -> Rgb {
    match hue.rem_euclid(360.0) as u32 {
        0..=59 => palette::RED,
        60..=119 => palette::YELLOW,
        120..=179 => palette::GREEN,
        180..=239 => palette::LIGHT_BLUE,
        240..=299 => palette::BLUE,
        _ => palette::PURPLE,
    }
}

pub struct WaveText {
    config: Config,
    chars: Vec<char>,
    width: u16,
    height: u16,
    phase: f64,
    hue: f64,
}

impl WaveText {
    pub fn new(width: u16, height: u16, config: Config) -> Self {
        Self {
            chars: config.text.chars().collect(),
            config,
            width,
            height,
            phase: 0.0,
            hue: 0.0,
        }
    }

    /// Row of the `i`-th character.
    pub fn row_of(&self, i: usize) -> i32 {
        let offset = self.config.amplitude * (self.phase + i as f64 * FRAC_PI_4).sin();
        self.height as i32 / 2 + offset as i32
    }
}

impl Simulation for WaveText {
    fn update(&mut self, dt: f64) {
        self.phase += dt * self.config.wave_speed;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        self.hue += dt * self.config.color_speed;
        if self.hue > 360.0 {
            self.hue -= 360.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.chars.is_empty() {
            return;
        }
        let start = ((self.width as i32 - self.chars.len() as i32) / 2).max(0);
        let hue_step = 360.0 / self.chars.len() as f64;
        for (i, &ch) in self.chars.iter().enumerate() {
            let x = start + i as i32;
            if x >= self.width as i32 {
                break;
            }
            let color = hue_color(self.hue + i as f64 * hue_step);
            surface.set_cell(x, self.row_of(i), ch, CellStyle::fg(color).bold());
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "波浪文字", "Wave Text")
        .description("文字沿正弦波上下起伏，颜色循环变化", "Text waving along a sine curve with cycling colors")
        .long_description("每个字符按相位差沿正弦曲线上下浮动，颜色沿色相环依次排开并缓慢流转。")
        .tags(&["文字", "波浪", "多彩"])
}

pub fn effect_with(config: Config) -> SimulationEffect<WaveText> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(WaveText::new(w, h, config.clone()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameBuffer;

    #[test]
    fn hue_bands() {
        assert_eq!(hue_color(0.0), palette::RED);
        assert_eq!(hue_color(59.9), palette::RED);
        assert_eq!(hue_color(60.0), palette::YELLOW);
        assert_eq!(hue_color(200.0), palette::LIGHT_BLUE);
        assert_eq!(hue_color(359.0), palette::PURPLE);
        assert_eq!(hue_color(365.0), palette::RED);
    }

    #[test]
    fn every_character_is_drawn_on_its_wave_row() {
        let mut wt = WaveText::new(40, 20, Config::default());
        wt.update(0.4);
        let mut fb = FrameBuffer::new(40, 20);
        wt.render(&mut fb);
        for (i, ch) in "SymbolMove".chars().enumerate() {
            let cell = fb.get(15 + i as i32, wt.row_of(i)).unwrap();
            assert_eq!(cell.ch, ch);
            assert!((7..=13).contains(&wt.row_of(i)));
        }
    }

    #[test]
    fn long_text_is_cut_at_the_edge() {
        let config = Config {
            text: "x".repeat(50),
            ..Config::default()
        };
        let wt = WaveText::new(20, 10, config);
        let mut fb = FrameBuffer::new(20, 10);
        wt.render(&mut fb);
        assert_eq!(fb.count_char('x'), 20);
    }
}
