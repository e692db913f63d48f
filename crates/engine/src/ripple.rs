//! Water ripples: expanding radial wavefronts that superpose.
//!
//! A drop at time `t` contributes
//! `sin(k·r − ω·t) / (1 + r/10) · exp(−damping·t)` to every cell at distance
//! `r`, but only inside the band `|r − speed·t| < band` around its wavefront.
//! It expires once the wavefront passes its max radius.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "water-ripple";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Seconds between drops.
    pub drop_interval: f64,
    /// Wavefront speed in cells/s.
    pub wave_speed: f64,
    /// Angular frequency ω.
    pub omega: f64,
    /// Wave number k.
    pub wave_number: f64,
    pub damping: f64,
    /// Half-width of the visible band around the wavefront.
    pub band: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drop_interval: 2.0,
            wave_speed: 3.0,
            omega: 3.0,
            wave_number: 0.5,
            damping: 0.3,
            band: 3.0,
            min_radius: 20.0,
            max_radius: 30.0,
            fps: 30,
        }
    }
}

impl Config {
    /// Amplitude of a single source at distance `r`, `t` seconds after impact.
    pub fn amplitude(&self, r: f64, t: f64) -> f64 {
        let front = self.wave_speed * t;
        if (r - front).abs() >= self.band {
            return 0.0;
        }
        (self.wave_number * r - self.omega * t).sin() / (1.0 + r / 10.0)
            * (-self.damping * t).exp()
    }
}

/// One wave source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drop {
    pub x: i32,
    pub y: i32,
    /// Seconds since impact.
    pub age: f64,
    pub max_radius: f64,
}

impl Drop {
    pub fn new(x: i32, y: i32, max_radius: f64) -> Self {
        Self {
            x,
            y,
            age: 0.0,
            max_radius,
        }
    }

    pub fn distance_to(&self, x: i32, y: i32) -> f64 {
        let dx = (x - self.x) as f64;
        let dy = (y - self.y) as f64;
        dx.hypot(dy)
    }
}

pub struct WaterRipple {
    config: Config,
    width: u16,
    height: u16,
    drops: Vec<Drop>,
    since_drop: f64,
    rng: StdRng,
}

impl WaterRipple {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self {
            config,
            width,
            height,
            drops: Vec::new(),
            since_drop: 0.0,
            rng,
        }
    }

    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    pub fn add_drop(&mut self, drop: Drop) {
        self.drops.push(drop);
    }

    fn random_drop(&mut self) -> Drop {
        let radius = if self.config.max_radius > self.config.min_radius {
            self.rng
                .random_range(self.config.min_radius..self.config.max_radius)
        } else {
            self.config.min_radius
        };
        Drop::new(
            self.rng.random_range(0..self.width.max(1)) as i32,
            self.rng.random_range(0..self.height.max(1)) as i32,
            radius,
        )
    }

    /// Superposed amplitude of every live drop at `(x, y)`.
    pub fn amplitude_at(&self, x: i32, y: i32) -> f64 {
        self.drops
            .iter()
            .map(|d| self.config.amplitude(d.distance_to(x, y), d.age))
            .sum()
    }
}

fn glyph_for(amplitude: f64) -> Option<(char, CellStyle)> {
    if amplitude.abs() <= 0.15 {
        return None;
    }
    Some(if amplitude > 0.5 {
        ('○', CellStyle::fg(palette::WHITE))
    } else if amplitude > 0.3 {
        ('◯', CellStyle::fg(palette::LIGHT_CYAN))
    } else if amplitude < -0.3 {
        ('·', CellStyle::fg(palette::BLUE))
    } else {
        ('~', CellStyle::fg(palette::LIGHT_BLUE))
    })
}

impl Simulation for WaterRipple {
    fn update(&mut self, dt: f64) {
        self.since_drop += dt;
        if self.since_drop >= self.config.drop_interval {
            self.since_drop = 0.0;
            let drop = self.random_drop();
            self.drops.push(drop);
        }

        let speed = self.config.wave_speed;
        self.drops.retain_mut(|d| {
            d.age += dt;
            speed * d.age < d.max_radius
        });
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.drops.is_empty() {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some((ch, style)) = glyph_for(self.amplitude_at(x, y)) {
                    surface.set_cell(x, y, ch, style);
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
    EffectMetadata::new(ID, "水波涟漪", "Water Ripple")
        .description("模拟水滴落下形成的涟漪效果", "Simulates ripple effects from water drops")
        .long_description("水滴随机落下，波前以固定速度向外扩散，多个涟漪按叠加原理相互干涉并逐渐衰减。")
        .tags(&["物理", "动画", "自然", "放松"])
}

pub fn effect_with(config: Config) -> SimulationEffect<WaterRipple> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(WaterRipple::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
