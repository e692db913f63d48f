//! Sum-of-sines plasma field.

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "plasma";

const GLYPHS: [char; 5] = [' ', '░', '▒', '▓', '█'];
const COLORS: [Rgb; 7] = [
    palette::BLUE,
    palette::LIGHT_BLUE,
    palette::GREEN,
    palette::YELLOW,
    palette::RED,
    palette::PINK,
    palette::PURPLE,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub speed: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 1.0,
            fps: 30,
        }
    }
}

pub struct Plasma {
    config: Config,
    width: u16,
    height: u16,
    time: f64,
}

/// Field value in `0.0..=1.0` at normalized coordinates `(fx, fy)`.
pub fn field(fx: f64, fy: f64, t: f64) -> f64 {
    let mut v = (fx * 10.0 + t).sin();
    v += (fy * 10.0 + t).sin();
    v += ((fx * 10.0 + fy * 10.0 + t) / 2.0).sin();

    let cx = fx + 0.5 * (t / 5.0).sin();
    let cy = fy + 0.5 * (t / 3.0).cos();
    v += ((100.0 * (cx * cx + cy * cy)).sqrt() + t).sin();

    (v + 4.0) / 8.0
}

fn bucket<T: Copy>(table: &[T], value: f64) -> T {
    let idx = ((value * table.len() as f64).max(0.0) as usize).min(table.len() - 1);
    table[idx]
}

impl Plasma {
    pub fn new(width: u16, height: u16, config: Config) -> Self {
        Self {
            config,
            width,
            height,
            time: 0.0,
        }
    }

    pub fn value_at(&self, x: u16, y: u16) -> f64 {
        let fx = x as f64 / self.width.max(1) as f64;
        let fy = y as f64 / self.height.max(1) as f64;
        field(fx, fy, self.time)
    }
}

impl Simulation for Plasma {
    fn update(&mut self, dt: f64) {
        self.time += dt * self.config.speed;
    }

    fn render(&self, surface: &mut dyn Surface) {
        for y in 0..self.height {
            for x in 0..self.width {
                let v = self.value_at(x, y);
                let style = CellStyle::fg(bucket(&COLORS, v));
                surface.set_cell(x as i32, y as i32, bucket(&GLYPHS, v), style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "Plasma 等离子", "Plasma")
        .description(
            "彩色等离子云效果，使用正弦函数生成图案，颜色循环动画",
            "Colorful plasma clouds generated from layered sine functions",
        )
        .long_description("四层正弦波叠加成平滑流动的等离子场，数值映射为字符密度和颜色。")
        .tags(&["数学", "多彩", "动画", "抽象"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Plasma> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(Plasma::new(w, h, config))
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
    fn field_is_normalized() {
        for i in 0..50 {
            for j in 0..50 {
                let v = field(i as f64 / 50.0, j as f64 / 50.0, i as f64 * 0.37);
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn origin_at_time_zero() {
        // sin(0) + sin(0) + sin(0) + sin(sqrt(100 * 0.25))
        let expected = ((5.0f64).sin() + 4.0) / 8.0;
        assert!((field(0.0, 0.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn fills_every_cell_and_animates() {
        let mut p = Plasma::new(20, 10, Config::default());
        let mut a = FrameBuffer::new(20, 10);
        p.render(&mut a);
        p.update(0.5);
        let mut b = FrameBuffer::new(20, 10);
        p.render(&mut b);
        assert_ne!(a.cells(), b.cells());
    }
}
