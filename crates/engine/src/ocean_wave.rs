//! Ocean surface with foam and depth shading.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "ocean-wave";

const FOAM: [char; 3] = ['~', '≈', '∿'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub wave_speed: f64,
    pub wave_height: f64,
    pub layers: u32,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wave_speed: 2.0,
            wave_height: 4.0,
            layers: 3,
            fps: 30,
        }
    }
}

pub struct OceanWave {
    config: Config,
    width: u16,
    height: u16,
    phase: f64,
    /// Foam glyph per column, re-rolled every update.
    foam: Vec<char>,
    rng: StdRng,
}

impl OceanWave {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let mut ocean = Self {
            config,
            width,
            height,
            phase: 0.0,
            foam: Vec::new(),
            rng,
        };
        ocean.roll_foam();
        ocean
    }

    fn roll_foam(&mut self) {
        let rng = &mut self.rng;
        self.foam = (0..self.width)
            .map(|_| FOAM[rng.random_range(0..FOAM.len())])
            .collect();
    }

    /// Surface row at column `x`, measured from the top.
    pub fn surface_row(&self, x: i32) -> i32 {
        let base = self.height as i32 * 2 / 3;
        let offset: f64 = (0..self.config.layers)
            .map(|i| {
                let n = (i + 1) as f64;
                let amp = self.config.wave_height / n;
                amp * (self.phase + x as f64 * 0.05 * n * 0.3).sin()
            })
            .sum();
        base + offset as i32
    }
}

impl Simulation for OceanWave {
    fn update(&mut self, dt: f64) {
        self.phase += self.config.wave_speed * dt;
        if self.phase > TAU * 100.0 {
            self.phase -= TAU * 100.0;
        }
        self.roll_foam();
    }

    fn render(&self, surface: &mut dyn Surface) {
        for x in 0..self.width as i32 {
            let top = self.surface_row(x);
            for y in top.max(0)..self.height as i32 {
                let (ch, color) = match y - top {
                    0 => (self.foam[x as usize], palette::WHITE),
                    1 => ('≈', palette::LIGHT_CYAN),
                    2 => ('≈', palette::LIGHT_BLUE),
                    3..=5 => ('~', palette::BLUE),
                    _ => ('~', palette::DARK_BLUE),
                };
                surface.set_cell(x, y, ch, CellStyle::fg(color));
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.roll_foam();
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "字符海浪", "Ocean Wave")
        .description("模拟海浪波动的自然效果", "Simulates natural ocean wave motion")
        .long_description("多层正弦波叠加成起伏的海面，浪尖泛起白色泡沫，越深处颜色越暗。")
        .tags(&["自然", "海洋", "放松", "波浪"])
}

pub fn effect_with(config: Config) -> SimulationEffect<OceanWave> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(OceanWave::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
