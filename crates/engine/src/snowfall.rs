//! Snow in three parallax layers.
//!
//! Far flakes are small, grey and slow; near flakes are large, white and
//! fast. Every flake sways sideways on its own sine phase and wraps around
//! the side edges.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Density, Rgb};

const ID: &str = "snowfall";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub density: Density,
    /// Global fall speed multiplier (cells/s per unit of layer speed).
    pub speed: f64,
    pub max_flakes: usize,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            density: Density::Medium,
            speed: 10.0,
            max_flakes: 500,
            fps: 30,
        }
    }
}

impl Config {
    /// Chance per frame to spawn, and the spawn count range.
    fn spawn_policy(&self) -> (f64, std::ops::RangeInclusive<usize>) {
        match self.density {
            Density::Sparse => (0.3, 1..=2),
            Density::Medium => (1.0, 1..=5),
            Density::Dense => (1.0, 3..=10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Far,
    Middle,
    Near,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Far, Layer::Middle, Layer::Near];

    fn glyphs(self) -> &'static [char] {
        match self {
            Layer::Far => &['·', '•', '.'],
            Layer::Middle => &['*', '❅', '·'],
            Layer::Near => &['❆', '❅', '*', '✻'],
        }
    }

    fn colors(self) -> &'static [Rgb] {
        match self {
            Layer::Far => &[palette::GRAY],
            Layer::Middle => &[palette::WHITE],
            Layer::Near => &[palette::WHITE, palette::LIGHT_BLUE],
        }
    }

    /// Layer speed range.
    pub fn speed(self) -> std::ops::Range<f64> {
        match self {
            Layer::Far => 0.5..1.0,
            Layer::Middle => 1.0..1.5,
            Layer::Near => 1.5..2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flake {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub swing: f64,
    pub amplitude: f64,
    pub layer: Layer,
    pub glyph: char,
    pub color: Rgb,
}

pub struct Snowfall {
    config: Config,
    width: u16,
    height: u16,
    flakes: Vec<Flake>,
    rng: StdRng,
}

impl Snowfall {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let mut snow = Self {
            config,
            width,
            height,
            flakes: Vec::new(),
            rng,
        };
        for _ in 0..height / 2 {
            let mut flake = snow.flake();
            flake.y = snow.rng.random_range(0..height.max(1)) as f64;
            snow.flakes.push(flake);
        }
        snow
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    fn flake(&mut self) -> Flake {
        let layer = *Layer::ALL.choose(&mut self.rng).unwrap_or(&Layer::Middle);
        Flake {
            x: self.rng.random_range(0..self.width.max(1)) as f64,
            y: 0.0,
            speed: self.rng.random_range(layer.speed()),
            swing: self.rng.random::<f64>() * std::f64::consts::TAU,
            amplitude: self.rng.random_range(0.3..1.0),
            layer,
            glyph: *layer.glyphs().choose(&mut self.rng).unwrap_or(&'*'),
            color: *layer.colors().choose(&mut self.rng).unwrap_or(&palette::WHITE),
        }
    }

    fn spawn(&mut self) {
        let (chance, count) = self.config.spawn_policy();
        if self.rng.random::<f64>() >= chance {
            return;
        }
        let n = self.rng.random_range(count);
        for _ in 0..n {
            if self.flakes.len() >= self.config.max_flakes {
                break;
            }
            let flake = self.flake();
            self.flakes.push(flake);
        }
    }
}

impl Simulation for Snowfall {
    fn update(&mut self, dt: f64) {
        self.spawn();

        let width = self.width as f64;
        let height = self.height as f64;
        let speed = self.config.speed;
        self.flakes.retain_mut(|f| {
            f.y += f.speed * dt * speed;
            f.swing += dt * 2.0;
            f.x += f.swing.sin() * f.amplitude * dt * 5.0;
            if width > 0.0 {
                f.x = f.x.rem_euclid(width);
                if f.x >= width {
                    f.x = 0.0;
                }
            }
            f.y < height
        });
    }

    fn render(&self, surface: &mut dyn Surface) {
        for layer in Layer::ALL {
            for f in self.flakes.iter().filter(|f| f.layer == layer) {
                let mut style = CellStyle::fg(f.color);
                if layer == Layer::Near {
                    style = style.bold();
                }
                surface.set_cell(f.x as i32, f.y as i32, f.glyph, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "雪花飘落", "Snowfall")
        .description("美丽的雪花飘落效果,支持多层次雪花", "Beautiful snowfall with multiple layers")
        .long_description("远中近三层雪花以不同速度和大小飘落，并随正弦摆动左右飘移，营造景深。")
        .tags(&["自然", "冬天", "放松", "粒子"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Snowfall> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(Snowfall::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
