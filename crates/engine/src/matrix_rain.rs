//! Falling glyph streams.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, CharSet, Density, Rgb, Speed};

const ID: &str = "matrix-rain";

/// Chance per nominal frame that a stream's head glyph changes.
const HEAD_FLICKER: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub charset: CharSet,
    pub speed: Speed,
    pub density: Density,
    pub fps: u32,
    /// Upper bound of the random extra trail length.
    pub trail_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charset: CharSet::Mixed,
            speed: Speed::Medium,
            density: Density::Medium,
            fps: 30,
            trail_length: 15,
        }
    }
}

impl Config {
    /// Stream count for a surface `width` columns wide.
    pub fn drop_count(&self, width: u16) -> usize {
        let width = width as usize;
        match self.density {
            Density::Sparse => width / 4,
            Density::Medium => width / 2,
            Density::Dense => width,
        }
    }

    /// Fall speed range in cells per frame.
    pub fn speed_range(&self) -> (f64, f64) {
        match self.speed {
            Speed::Slow => (0.2, 0.4),
            Speed::Medium => (0.4, 0.7),
            Speed::Fast => (0.7, 1.2),
        }
    }
}

/// One falling stream. `chars[0]` is the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub x: i32,
    pub y: f64,
    /// Cells per frame.
    pub speed: f64,
    pub chars: Vec<char>,
}

pub struct MatrixRain {
    config: Config,
    glyphs: Vec<char>,
    width: u16,
    height: u16,
    streams: Vec<Stream>,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let mut rain = Self {
            glyphs: config.charset.glyphs(),
            config,
            width,
            height,
            streams: Vec::new(),
            rng,
        };
        rain.populate();
        rain
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    fn glyph(&mut self) -> char {
        *self.glyphs.choose(&mut self.rng).unwrap_or(&'0')
    }

    fn populate(&mut self) {
        let count = self.config.drop_count(self.width);
        self.streams = (0..count)
            .map(|_| {
                let mut s = self.fresh_stream();
                s.y = self.rng.random_range(0..self.height.max(1)) as f64;
                s
            })
            .collect();
    }

    fn fresh_stream(&mut self) -> Stream {
        let len = self.rng.random_range(0..self.config.trail_length.max(1)) + 5;
        let (lo, hi) = self.config.speed_range();
        Stream {
            x: self.rng.random_range(0..self.width.max(1)) as i32,
            y: 0.0,
            speed: self.rng.random_range(lo..hi),
            chars: (0..len).map(|_| self.glyph()).collect(),
        }
    }
}

fn trail_color(index: usize, len: usize) -> Rgb {
    let ratio = index as f64 / len as f64;
    if ratio < 0.1 {
        palette::WHITE
    } else if ratio < 0.3 {
        palette::LIGHT_GREEN
    } else if ratio < 0.7 {
        palette::GREEN
    } else {
        palette::DARK_GREEN
    }
}

impl Simulation for MatrixRain {
    fn update(&mut self, dt: f64) {
        let frames = dt * self.config.fps as f64;
        let height = self.height as f64;
        let flicker = crate::scaled_chance(HEAD_FLICKER, frames);
        for i in 0..self.streams.len() {
            self.streams[i].y += self.streams[i].speed * frames;

            if self.rng.random::<f64>() < flicker {
                let g = self.glyph();
                if let Some(head) = self.streams[i].chars.first_mut() {
                    *head = g;
                }
            }

            if self.streams[i].y > height + self.streams[i].chars.len() as f64 {
                self.streams[i] = self.fresh_stream();
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        for stream in &self.streams {
            let head = stream.y as i32;
            let len = stream.chars.len();
            for (i, &ch) in stream.chars.iter().enumerate() {
                let mut style = CellStyle::fg(trail_color(i, len));
                if i == 0 {
                    style = style.bold();
                }
                surface.set_cell(stream.x, head - i as i32, ch, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let width_changed = width != self.width;
        self.width = width;
        self.height = height;
        if width_changed {
            self.populate();
        }
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "黑客帝国数字雨", "Matrix Rain")
        .description(
            "经典的黑客帝国风格数字雨效果,字符从上往下流动",
            "Classic Matrix-style digital rain with characters falling from top to bottom",
        )
        .long_description("随机列上的字符流自上而下坠落，头部高亮并不断变换，尾迹逐渐变暗；速度、密度和字符集均可配置。")
        .tags(&["经典", "字符", "动画", "黑客"])
}

pub fn effect_with(config: Config) -> SimulationEffect<MatrixRain> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(MatrixRain::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameBuffer;
    use rand::SeedableRng;

    fn rain(config: Config) -> MatrixRain {
        MatrixRain::new(80, 24, config, StdRng::seed_from_u64(8))
    }

    #[test]
    fn density_sets_stream_count() {
        for (density, count) in [
            (Density::Sparse, 20),
            (Density::Medium, 40),
            (Density::Dense, 80),
        ] {
            let r = rain(Config {
                density,
                ..Config::default()
            });
            assert_eq!(r.streams().len(), count);
        }
    }

    #[test]
    fn streams_use_configured_glyphs_and_speeds() {
        let config = Config {
            charset: CharSet::Digits,
            speed: Speed::Fast,
            ..Config::default()
        };
        let r = rain(config);
        for s in r.streams() {
            assert!(s.chars.iter().all(char::is_ascii_digit));
            assert!((0.7..1.2).contains(&s.speed));
            assert!((5..20).contains(&s.chars.len()));
        }
    }

    #[test]
    fn streams_fall_and_recycle() {
        let mut r = rain(Config::default());
        let before: Vec<f64> = r.streams().iter().map(|s| s.y).collect();
        r.update(1.0 / 30.0);
        for (s, y0) in r.streams().iter().zip(&before) {
            assert!(s.y > *y0 || s.y == 0.0);
        }
        for _ in 0..2000 {
            r.update(1.0 / 30.0);
        }
        assert!(r.streams().iter().all(|s| s.y <= 24.0 + s.chars.len() as f64));
    }

    #[test]
    fn heads_hold_still_over_a_zero_length_tick() {
        let mut r = rain(Config::default());
        let before = r.streams().to_vec();
        for _ in 0..100 {
            r.update(0.0);
        }
        assert_eq!(r.streams(), &before[..]);
    }

    #[test]
    fn resize_repopulates_on_width_change() {
        let mut r = rain(Config::default());
        r.resize(40, 24);
        assert_eq!(r.streams().len(), 20);
        assert!(r.streams().iter().all(|s| s.x < 40));
    }

    #[test]
    fn head_is_white() {
        let mut r = rain(Config::default());
        r.update(0.1);
        let mut fb = FrameBuffer::new(80, 24);
        r.render(&mut fb);
        assert!(fb.cells().iter().any(|c| c.style.fg == palette::WHITE && c.style.bold));
    }
}
