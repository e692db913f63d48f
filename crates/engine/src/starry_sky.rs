//! Twinkling stars.
//!
//! Each star runs its own sine phase; brightness stays within 0.3..=1.0 so a
//! star never disappears completely.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Density, Rgb};

const ID: &str = "starry-sky";

const GLYPHS: [char; 6] = ['*', '·', '.', '+', '✦', '✧'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Classic,
    Colorful,
    Blue,
}

impl Theme {
    fn colors(self) -> &'static [Rgb] {
        match self {
            Theme::Classic => &[palette::WHITE],
            Theme::Colorful => &[
                palette::LIGHT_BLUE,
                palette::LIGHT_YELLOW,
                palette::LIGHT_CYAN,
                palette::WHITE,
            ],
            Theme::Blue => &[
                palette::BLUE,
                palette::LIGHT_BLUE,
                palette::DARK_BLUE,
                palette::CADET_BLUE,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub density: Density,
    pub theme: Theme,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            density: Density::Medium,
            theme: Theme::Classic,
            fps: 30,
        }
    }
}

impl Config {
    /// Fraction of cells holding a star.
    pub fn coverage(&self) -> f64 {
        match self.density {
            Density::Sparse => 0.01,
            Density::Medium => 0.02,
            Density::Dense => 0.03,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: Rgb,
    pub phase: f64,
    /// Phase speed in rad/s.
    pub speed: f64,
}

impl Star {
    pub fn brightness(&self) -> f64 {
        0.3 + 0.7 * (0.5 + 0.5 * self.phase.sin())
    }
}

pub struct StarrySky {
    config: Config,
    stars: Vec<Star>,
    rng: StdRng,
}

impl StarrySky {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let mut sky = Self {
            config,
            stars: Vec::new(),
            rng,
        };
        sky.generate(width, height);
        sky
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    fn generate(&mut self, width: u16, height: u16) {
        let count = (width as f64 * height as f64 * self.config.coverage()) as usize;
        let colors = self.config.theme.colors();
        let rng = &mut self.rng;
        self.stars = (0..count)
            .map(|_| Star {
                x: rng.random_range(0..width.max(1)) as i32,
                y: rng.random_range(0..height.max(1)) as i32,
                glyph: *GLYPHS.choose(rng).unwrap_or(&'*'),
                color: *colors.choose(rng).unwrap_or(&palette::WHITE),
                phase: rng.random::<f64>() * TAU,
                speed: rng.random_range(0.5..2.0),
            })
            .collect();
    }
}

impl Simulation for StarrySky {
    fn update(&mut self, dt: f64) {
        for star in &mut self.stars {
            star.phase += dt * star.speed;
            if star.phase > TAU {
                star.phase -= TAU;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            let b = star.brightness();
            let color = if b > 0.5 { star.color } else { palette::GRAY };
            let mut style = CellStyle::fg(color);
            if b > 0.9 {
                style = style.bold();
            }
            surface.set_cell(star.x, star.y, star.glyph, style);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.generate(width, height);
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "星空闪烁", "Starry Sky")
        .description("美丽的星空,星星随机闪烁", "Beautiful starry sky with twinkling stars")
        .long_description("星星随机分布在夜空中，每颗星按各自的节奏明暗闪烁。")
        .tags(&["自然", "夜晚", "放松"])
}

pub fn effect_with(config: Config) -> SimulationEffect<StarrySky> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(StarrySky::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn star_count_follows_coverage() {
        let rng = StdRng::seed_from_u64(1);
        let sky = StarrySky::new(100, 50, Config::default(), rng);
        assert_eq!(sky.stars().len(), 100);

        let dense = Config {
            density: Density::Dense,
            ..Config::default()
        };
        let sky = StarrySky::new(100, 50, dense, StdRng::seed_from_u64(1));
        assert_eq!(sky.stars().len(), 150);
    }

    #[test]
    fn brightness_stays_in_range() {
        let mut sky = StarrySky::new(40, 20, Config::default(), StdRng::seed_from_u64(2));
        for _ in 0..200 {
            sky.update(0.05);
            for s in sky.stars() {
                let b = s.brightness();
                assert!((0.3 - 1e-12..=1.0 + 1e-12).contains(&b));
                assert!(s.phase <= TAU);
            }
        }
    }

    #[test]
    fn theme_picks_colors() {
        let config = Config {
            theme: Theme::Blue,
            ..Config::default()
        };
        let sky = StarrySky::new(100, 50, config, StdRng::seed_from_u64(3));
        assert!(sky.stars().iter().all(|s| Theme::Blue.colors().contains(&s.color)));
    }
}
