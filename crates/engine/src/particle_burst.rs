//! Particle bursts: periodic radial explosions at random points.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::particle::{Burst, Particle};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "particle-burst";

const COLORS: [Rgb; 6] = [
    palette::RED,
    palette::YELLOW,
    palette::ORANGE,
    palette::PURPLE,
    palette::PINK,
    palette::WHITE,
];

const GLYPHS: [char; 6] = ['*', '●', '○', '·', '+', '×'];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub burst_interval: f64,
    pub particle_count: usize,
    pub gravity: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            burst_interval: 2.0,
            particle_count: 100,
            gravity: 5.0,
            fps: 30,
        }
    }
}

/// A particle plus what it looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub body: Particle,
    pub max_life: f64,
    pub color: Rgb,
    pub glyph: char,
}

impl Spark {
    /// Remaining life as a fraction of the initial life.
    pub fn alpha(&self) -> f64 {
        self.body.life / self.max_life
    }
}

pub struct ParticleBurst {
    config: Config,
    width: u16,
    height: u16,
    sparks: Vec<Spark>,
    since_burst: f64,
    rng: StdRng,
}

impl ParticleBurst {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self {
            config,
            width,
            height,
            sparks: Vec::new(),
            since_burst: 0.0,
            rng,
        }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Explode at a random cell.
    pub fn burst(&mut self) {
        let cx = self.rng.random_range(0..self.width.max(1)) as f64;
        let cy = self.rng.random_range(0..self.height.max(1)) as f64;
        self.burst_at(cx, cy);
    }

    pub fn burst_at(&mut self, x: f64, y: f64) {
        let template = Burst {
            count: self.config.particle_count,
            speed: 5.0..15.0,
            life: 1.0..3.0,
            decay: 1.0..1.0,
        };
        for body in template.spawn(x, y, &mut self.rng) {
            let color = *COLORS.choose(&mut self.rng).unwrap_or(&palette::WHITE);
            let glyph = *GLYPHS.choose(&mut self.rng).unwrap_or(&'*');
            self.sparks.push(Spark {
                max_life: body.life,
                body,
                color,
                glyph,
            });
        }
    }
}

impl Simulation for ParticleBurst {
    fn update(&mut self, dt: f64) {
        self.since_burst += dt;
        if self.since_burst >= self.config.burst_interval {
            self.since_burst = 0.0;
            self.burst();
        }

        let (w, h, g) = (self.width, self.height, self.config.gravity);
        self.sparks.retain_mut(|s| {
            s.body.step(dt, g);
            s.body.is_alive() && s.body.in_bounds(w, h)
        });
    }

    fn render(&self, surface: &mut dyn Surface) {
        for spark in &self.sparks {
            let alpha = spark.alpha();
            let color = if alpha > 0.7 {
                spark.color
            } else if alpha > 0.3 {
                palette::GRAY
            } else {
                palette::DARK_GRAY
            };
            let (x, y) = spark.body.cell();
            surface.set_cell(x, y, spark.glyph, CellStyle::fg(color));
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "粒子爆炸", "Particle Burst")
        .description(
            "从中心点向外爆炸的粒子效果,粒子随时间衰减和消失",
            "Particles exploding outward from center with decay over time",
        )
        .long_description("随机位置周期性爆炸，粒子带初速度四散，受重力影响并随生命衰减变暗。")
        .tags(&["粒子", "爆炸", "动画", "物理"])
}

pub fn effect_with(config: Config) -> SimulationEffect<ParticleBurst> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(ParticleBurst::new(w, h, config.clone(), crate::os_rng()))
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

    fn burst() -> ParticleBurst {
        ParticleBurst::new(60, 30, Config::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn bursts_on_interval() {
        let mut pb = burst();
        pb.update(1.0);
        assert!(pb.sparks().is_empty());
        pb.update(1.0);
        assert!(!pb.sparks().is_empty());
        assert!(pb.sparks().len() <= 100);
    }

    #[test]
    fn sparks_fade_out_within_max_life() {
        let mut pb = burst();
        pb.burst_at(30.0, 15.0);
        assert_eq!(pb.sparks().len(), 100);
        for s in pb.sparks() {
            assert!((1.0..3.0).contains(&s.max_life));
            assert_eq!(s.alpha(), 1.0);
        }
        for _ in 0..40 {
            pb.since_burst = 0.0;
            pb.update(0.1);
        }
        assert!(pb.sparks().is_empty());
    }

    #[test]
    fn render_is_idempotent() {
        let mut pb = burst();
        pb.burst_at(30.0, 15.0);
        pb.update(0.1);
        let mut a = FrameBuffer::new(60, 30);
        let mut b = FrameBuffer::new(60, 30);
        pb.render(&mut a);
        pb.render(&mut b);
        assert_eq!(a.cells(), b.cells());
        assert!(a.non_blank_count() > 0);
    }
}
