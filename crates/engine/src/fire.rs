//! Heat diffusion fire.
//!
//! The bottom row is a random heat source. Every other cell takes the mean of
//! its in-bounds 3×3 neighbourhood from the previous frame, scaled by the
//! cooling factor. Frames are double-buffered.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "fire-effect";

const GLYPHS: [char; 9] = [' ', '.', ':', '*', 's', 'S', '#', '$', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Upper bound of the source heat.
    pub intensity: f64,
    /// Multiplier applied after averaging; must be below 1.
    pub cooling: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            cooling: 0.95,
            fps: 30,
        }
    }
}

pub struct Fire {
    config: Config,
    width: usize,
    height: usize,
    heat: [Vec<f64>; 2],
    active: usize,
    rng: StdRng,
}

impl Fire {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let len = width as usize * height as usize;
        Self {
            config,
            width: width as usize,
            height: height as usize,
            heat: [vec![0.0; len], vec![0.0; len]],
            active: 0,
            rng,
        }
    }

    /// Fire with a preset heat field (row-major).
    pub fn with_heat(
        width: u16,
        height: u16,
        heat: Vec<f64>,
        config: Config,
        rng: StdRng,
    ) -> Result<Self, EffectError> {
        let mut fire = Self::new(width, height, config, rng);
        if heat.len() != fire.width * fire.height {
            return Err(EffectError::Init(format!(
                "heat field has {} cells, expected {width}x{height}",
                heat.len()
            )));
        }
        fire.heat[0] = heat;
        Ok(fire)
    }

    pub fn heat(&self, x: usize, y: usize) -> f64 {
        self.heat[self.active][y * self.width + x]
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return;
        }

        let [a, b] = &mut self.heat;
        let (cur, next) = if self.active == 0 { (a, b) } else { (b, a) };

        let bottom = (h - 1) * w;
        for v in &mut cur[bottom..] {
            *v = self.rng.random::<f64>() * self.config.intensity;
        }

        for y in 0..h - 1 {
            for x in 0..w {
                let mut sum = 0.0;
                let mut count = 0u32;
                for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                        sum += cur[ny * w + nx];
                        count += 1;
                    }
                }
                next[y * w + x] = sum / count as f64 * self.config.cooling;
            }
        }
        next[bottom..].copy_from_slice(&cur[bottom..]);

        self.active = 1 - self.active;
    }
}

fn glyph_for(heat: f64) -> (char, CellStyle) {
    let idx = ((heat * GLYPHS.len() as f64) as usize).min(GLYPHS.len() - 1);
    let color = if heat > 0.8 {
        palette::YELLOW
    } else if heat > 0.5 {
        palette::ORANGE
    } else if heat > 0.3 {
        palette::RED
    } else {
        palette::DARK_RED
    };
    (GLYPHS[idx], CellStyle::fg(color))
}

impl Simulation for Fire {
    fn update(&mut self, _dt: f64) {
        self.step();
    }

    fn render(&self, surface: &mut dyn Surface) {
        for (i, &heat) in self.heat[self.active].iter().enumerate() {
            if heat > 0.05 {
                let (ch, style) = glyph_for(heat);
                surface.set_cell((i % self.width) as i32, (i / self.width) as i32, ch, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let len = width as usize * height as usize;
        self.width = width as usize;
        self.height = height as usize;
        self.heat = [vec![0.0; len], vec![0.0; len]];
        self.active = 0;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "火焰燃烧", "Fire Effect")
        .description(
            "从底部向上燃烧的火焰效果,使用字符密度模拟火焰形状",
            "Burning fire effect rising from bottom, using character density to simulate flames",
        )
        .long_description("底部随机热源，热量向周围扩散并逐渐冷却，字符密度与颜色表示温度。")
        .tags(&["火焰", "热", "动画", "自然"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Fire> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h < 2 {
            return Err(EffectError::surface_too_small(w, h, 1, 2));
        }
        Ok(Fire::new(w, h, config, crate::os_rng()))
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

    fn cold_source() -> Config {
        Config {
            intensity: 0.0,
            ..Config::default()
        }
    }

    #[test]
    fn cells_average_in_bounds_neighbours() {
        let mut heat = vec![0.0; 25];
        heat[5 + 2] = 9.0; // (2, 1)
        let mut fire = Fire::with_heat(5, 5, heat, cold_source(), StdRng::seed_from_u64(1)).unwrap();
        fire.step();

        // interior: full 3x3 neighbourhood
        assert!((fire.heat(2, 1) - 9.0 / 9.0 * 0.95).abs() < 1e-12);
        // top edge: 2x3 neighbourhood
        assert!((fire.heat(1, 0) - 9.0 / 6.0 * 0.95).abs() < 1e-12);
        // corner away from the hot cell
        assert_eq!(fire.heat(0, 0), 0.0);
        assert_eq!(fire.heat(4, 3), 0.0);
    }

    #[test]
    fn bottom_row_is_reseeded_within_intensity() {
        let config = Config {
            intensity: 0.5,
            ..Config::default()
        };
        let mut fire = Fire::new(16, 4, config, StdRng::seed_from_u64(2));
        fire.step();
        let row: Vec<f64> = (0..16).map(|x| fire.heat(x, 3)).collect();
        assert!(row.iter().all(|&v| (0.0..0.5).contains(&v)));
        assert!(row.iter().any(|&v| v > 0.0));

        fire.step();
        let next: Vec<f64> = (0..16).map(|x| fire.heat(x, 3)).collect();
        assert_ne!(row, next);
    }

    #[test]
    fn mismatched_heat_field_is_rejected() {
        let err = Fire::with_heat(4, 4, vec![1.0; 15], cold_source(), StdRng::seed_from_u64(3))
            .err()
            .unwrap();
        assert!(matches!(err, EffectError::Init(ref msg) if msg.contains("15")));
    }

    #[test]
    fn uniform_field_cools_by_factor() {
        let mut fire =
            Fire::with_heat(4, 4, vec![1.0; 16], cold_source(), StdRng::seed_from_u64(3)).unwrap();
        fire.step();
        assert!((fire.heat(1, 0) - 0.95).abs() < 1e-12);
        assert!((fire.heat(1, 1) - 0.95).abs() < 1e-12);
        assert_eq!(fire.heat(1, 3), 0.0);
    }

    #[test]
    fn heat_rises_from_the_source() {
        let mut fire = Fire::new(10, 6, Config::default(), StdRng::seed_from_u64(4));
        for _ in 0..10 {
            fire.step();
        }
        assert!(fire.heat(5, 4) > 0.0);
        let mut fb = FrameBuffer::new(10, 6);
        fire.render(&mut fb);
        assert!(fb.non_blank_count() > 0);
    }
}
