//! Rotating double helix.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "dna-helix";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Radians per second.
    pub rotation_speed: f64,
    /// Horizontal radius in cells.
    pub radius: f64,
    /// Twist per row in radians.
    pub spacing: f64,
    /// A base pair is drawn every this many rows.
    pub rung_every: i32,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation_speed: 1.0,
            radius: 8.0,
            spacing: 0.15,
            rung_every: 3,
            fps: 30,
        }
    }
}

pub struct DnaHelix {
    config: Config,
    width: u16,
    height: u16,
    angle: f64,
}

impl DnaHelix {
    pub fn new(width: u16, height: u16, config: Config) -> Self {
        Self {
            config,
            width,
            height,
            angle: 0.0,
        }
    }

    /// Twist angle of row offset `z` from the centre.
    fn theta(&self, z: i32) -> f64 {
        self.angle + z as f64 * self.config.spacing
    }

    /// Columns of the two strands at row offset `z`.
    pub fn strands(&self, z: i32) -> (i32, i32) {
        let cx = self.width as i32 / 2;
        let theta = self.theta(z);
        (
            cx + (self.config.radius * theta.cos()) as i32,
            cx + (self.config.radius * (theta + PI).cos()) as i32,
        )
    }
}

impl Simulation for DnaHelix {
    fn update(&mut self, dt: f64) {
        self.angle += self.config.rotation_speed * dt;
        if self.angle > TAU {
            self.angle -= TAU;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let half = self.height as i32 / 2;
        let strand_a = CellStyle::fg(palette::LIGHT_BLUE).bold();
        let strand_b = CellStyle::fg(palette::LIGHT_CORAL).bold();
        let rung = CellStyle::fg(palette::GRAY);
        let front = CellStyle::fg(palette::YELLOW);

        for z in -half..half {
            let y = half + z;
            let (x1, x2) = self.strands(z);

            // rungs go underneath the strands
            if self.config.rung_every > 0 && z % self.config.rung_every == 0 {
                let (lo, hi) = (x1.min(x2), x1.max(x2));
                let mid = (lo + hi) / 2;
                let facing = (self.theta(z) + FRAC_PI_2).sin() > 0.0;
                for x in lo..=hi {
                    if x == mid {
                        surface.set_cell(x, y, '═', if facing { front } else { rung });
                    } else {
                        surface.set_cell(x, y, '─', rung);
                    }
                }
            }

            surface.set_cell(x1, y, '●', strand_a);
            surface.set_cell(x2, y, '●', strand_b);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "DNA双螺旋", "DNA Helix")
        .description("旋转的DNA双螺旋结构", "Rotating DNA double helix")
        .long_description("两条互补链围绕中轴旋转，每隔几行用碱基对连接，朝向观察者的碱基对高亮显示。")
        .tags(&["科学", "3D", "动画"])
}

pub fn effect_with(config: Config) -> SimulationEffect<DnaHelix> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(DnaHelix::new(w, h, config))
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
    fn strands_are_mirrored_around_the_axis() {
        let helix = DnaHelix::new(40, 20, Config::default());
        assert_eq!(helix.strands(0), (28, 12));
        for z in -10..10 {
            let (a, b) = helix.strands(z);
            assert!((a + b - 40).abs() <= 1);
        }
    }

    #[test]
    fn every_row_has_both_strands() {
        let mut helix = DnaHelix::new(40, 20, Config::default());
        helix.update(0.7);
        let mut fb = FrameBuffer::new(40, 20);
        helix.render(&mut fb);
        for y in 0..20u16 {
            let row = fb.row_text(y);
            assert!(row.contains('●'), "row {y}: {row:?}");
        }
        // rungs on rows whose offset is a multiple of three
        assert!(fb.row_text(10).contains('─') || fb.row_text(10).contains('═'));
    }
}
