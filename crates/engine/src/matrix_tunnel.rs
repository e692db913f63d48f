//! Flying through a tunnel of glyph rings.
//!
//! Rings sit every half unit of depth between 1 and 50. Each frame a random
//! subset of them contributes one glyph at a random angle, projected with
//! `scale = 30 / depth`, so near rings spread wide and far rings huddle at the
//! centre.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "matrix-tunnel";

const GLYPHS: [char; 30] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'Z', 'T',
    'M', 'X', 'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ',
];

const MAX_DEPTH: f64 = 50.0;
const TUNNEL_RADIUS: f64 = 15.0;
/// Rings closer than this project far off screen.
const MIN_DEPTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Depth units per second.
    pub speed: f64,
    /// Chance that a ring shows a glyph on a given frame.
    pub density: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 5.0,
            density: 0.3,
            fps: 30,
        }
    }
}

/// A projected glyph for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub brightness: f64,
}

pub struct MatrixTunnel {
    config: Config,
    width: u16,
    height: u16,
    depth: f64,
    spots: Vec<Spot>,
    rng: StdRng,
}

fn brightness_color(b: f64) -> Rgb {
    if b > 0.7 {
        palette::GREEN
    } else if b > 0.4 {
        palette::LIGHT_GREEN
    } else if b > 0.2 {
        palette::DARK_GREEN
    } else {
        palette::DARK_GRAY
    }
}

impl MatrixTunnel {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self {
            config,
            width,
            height,
            depth: 0.0,
            spots: Vec::new(),
            rng,
        }
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// Screen position of a point on a ring at `depth`.
    pub fn project(&self, angle: f64, radius: f64, depth: f64) -> (i32, i32) {
        let scale = 30.0 / depth;
        let cx = self.width as i32 / 2;
        let cy = self.height as i32 / 2;
        (
            cx.saturating_add((radius * angle.cos() * scale) as i32),
            cy.saturating_add((radius * angle.sin() * scale) as i32),
        )
    }

    fn emit(&mut self) {
        self.spots.clear();
        let (w, h) = (self.width as i32, self.height as i32);
        let mut z = 1.0;
        while z < MAX_DEPTH {
            let mut depth = z + self.depth;
            if depth > MAX_DEPTH {
                depth -= MAX_DEPTH;
            }
            z += 0.5;
            if depth < MIN_DEPTH {
                continue;
            }

            if self.rng.random::<f64>() > self.config.density {
                continue;
            }
            let angle = self.rng.random::<f64>() * TAU;
            let radius = TUNNEL_RADIUS * self.rng.random_range(0.8..1.2);
            let (x, y) = self.project(angle, radius, depth);
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let idx = (depth * 10.0 + angle * 5.0) as usize % GLYPHS.len();
            self.spots.push(Spot {
                x,
                y,
                glyph: GLYPHS[idx],
                brightness: 1.0 / depth,
            });
        }
    }
}

impl Simulation for MatrixTunnel {
    fn update(&mut self, dt: f64) {
        self.depth += self.config.speed * dt;
        if self.depth > MAX_DEPTH {
            self.depth -= MAX_DEPTH;
        }
        self.emit();
    }

    fn render(&self, surface: &mut dyn Surface) {
        for s in &self.spots {
            let mut style = CellStyle::fg(brightness_color(s.brightness));
            if s.brightness > 0.8 {
                style = style.bold();
            }
            surface.set_cell(s.x, s.y, s.glyph, style);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.spots.clear();
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "矩阵隧道", "Matrix Tunnel")
        .description("3D隧道效果，字符从中心向外飞出", "3D tunnel with glyphs flying out from the centre")
        .long_description("字符环沿深度方向排列，透视投影后近处的环扩散到屏幕边缘，远处的环聚集在中心，营造穿越隧道的感觉。")
        .tags(&["3D", "字符", "动画", "黑客"])
}

pub fn effect_with(config: Config) -> SimulationEffect<MatrixTunnel> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(MatrixTunnel::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn tunnel(config: Config) -> MatrixTunnel {
        MatrixTunnel::new(80, 40, config, StdRng::seed_from_u64(14))
    }

    #[test]
    fn projection_shrinks_with_depth() {
        let t = tunnel(Config::default());
        let (near, _) = t.project(0.0, 15.0, 30.0);
        let (far, _) = t.project(0.0, 15.0, 45.0);
        assert_eq!(near, 40 + 15);
        assert_eq!(far, 40 + 10);
        assert_eq!(t.project(0.0, 0.0, 7.0), (40, 20));
    }

    #[test]
    fn spots_stay_on_screen() {
        let config = Config {
            density: 1.0,
            ..Config::default()
        };
        let mut t = tunnel(config);
        for _ in 0..50 {
            t.update(1.0 / 30.0);
            assert!(!t.spots().is_empty());
            for s in t.spots() {
                assert!((0..80).contains(&s.x) && (0..40).contains(&s.y));
                assert!(s.brightness > 0.0 && s.brightness <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn rings_near_the_wrap_point_are_skipped() {
        let config = Config {
            density: 1.0,
            ..Config::default()
        };
        let mut t = tunnel(config);
        t.depth = MAX_DEPTH - 0.01;
        for _ in 0..30 {
            t.update(1.0 / 30.0);
            for s in t.spots() {
                assert!((0..80).contains(&s.x) && (0..40).contains(&s.y));
                assert!(s.brightness <= 1.0);
            }
        }
        assert!(t.depth < 5.0);

        let (x, y) = t.project(0.3, 15.0, 1e-300);
        assert!(x > 80 && y > 40);
    }

    #[test]
    fn zero_density_is_empty() {
        let config = Config {
            density: 0.0,
            ..Config::default()
        };
        let mut t = tunnel(config);
        t.update(0.1);
        assert!(t.spots().is_empty());
    }
}
