//! Rainbow band following a sum of sine waves.

use std::f64::consts::TAU;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "rainbow-wave";

const COLORS: [Rgb; 7] = [
    palette::RED,
    palette::ORANGE,
    palette::YELLOW,
    palette::GREEN,
    palette::LIGHT_BLUE,
    palette::BLUE,
    palette::PURPLE,
];
const GLYPHS: [char; 4] = ['~', '≈', '∼', '≋'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub wave_speed: f64,
    pub wave_height: f64,
    pub waves: u32,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wave_speed: 1.0,
            wave_height: 5.0,
            waves: 3,
            fps: 30,
        }
    }
}

pub struct RainbowWave {
    config: Config,
    width: u16,
    height: u16,
    phase: f64,
}

impl RainbowWave {
    pub fn new(width: u16, height: u16, config: Config) -> Self {
        Self {
            config,
            width,
            height,
            phase: 0.0,
        }
    }

    /// Vertical offset of the band centre at column `x`. Wave `i` has
    /// frequency `(i+1)/2` and amplitude `height/(i+1)`.
    pub fn offset(&self, x: i32) -> f64 {
        (0..self.config.waves)
            .map(|i| {
                let n = (i + 1) as f64;
                let freq = n * 0.5;
                let amp = self.config.wave_height / n;
                amp * (self.phase + x as f64 * 0.1 * freq).sin()
            })
            .sum()
    }

    /// Band centre row at column `x`.
    pub fn wave_row(&self, x: i32) -> i32 {
        self.height as i32 / 2 + self.offset(x) as i32
    }
}

impl Simulation for RainbowWave {
    fn update(&mut self, dt: f64) {
        self.phase += dt * self.config.wave_speed;
        if self.phase > TAU {
            self.phase -= TAU;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let shift = (self.phase * 10.0) as i32;
        for x in 0..self.width as i32 {
            let row = self.wave_row(x);
            let color = COLORS[(x + shift).rem_euclid(COLORS.len() as i32) as usize];
            for y in row - 1..=row + 1 {
                let glyph = GLYPHS[(y - row).unsigned_abs() as usize % GLYPHS.len()];
                surface.set_cell(x, y, glyph, CellStyle::fg(color));
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "彩虹波浪", "Rainbow Wave")
        .description(
            "彩虹色的水平波浪从左到右滚动,充满整个屏幕",
            "Rainbow-colored horizontal waves scrolling across the screen",
        )
        .long_description("三个不同频率和振幅的正弦波叠加成一条彩虹带，颜色沿横向循环滚动。")
        .tags(&["多彩", "波浪", "动画"])
}

pub fn effect_with(config: Config) -> SimulationEffect<RainbowWave> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(RainbowWave::new(w, h, config))
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
    fn band_is_three_rows_per_column() {
        let wave = RainbowWave::new(30, 30, Config::default());
        let mut fb = FrameBuffer::new(30, 30);
        wave.render(&mut fb);
        for x in 0..30 {
            let row = wave.wave_row(x);
            assert_eq!(fb.get(x, row).map(|c| c.ch), Some('~'));
            assert_eq!(fb.get(x, row - 1).map(|c| c.ch), Some('≈'));
            assert_eq!(fb.get(x, row + 1).map(|c| c.ch), Some('≈'));
        }
        assert_eq!(fb.non_blank_count(), 90);
    }

    #[test]
    fn offset_stays_within_total_amplitude() {
        let mut wave = RainbowWave::new(80, 24, Config::default());
        let bound = 5.0 + 5.0 / 2.0 + 5.0 / 3.0;
        for _ in 0..100 {
            wave.update(0.1);
            for x in 0..80 {
                assert!(wave.offset(x).abs() <= bound + 1e-9);
            }
        }
    }

    #[test]
    fn starts_flat_at_the_left_edge() {
        let wave = RainbowWave::new(10, 20, Config::default());
        assert_eq!(wave.offset(0), 0.0);
        assert_eq!(wave.wave_row(0), 10);
    }
}
