//! Digit columns cascading down every column of the screen.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "digital-waterfall";

/// Chance per nominal frame that a head flashes white.
const HEAD_FLASH: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Fall speed range in cells per frame.
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_length: usize,
    pub max_length: usize,
    /// Chance per nominal frame that a column's head digit changes.
    pub change_rate: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_speed: 0.5,
            max_speed: 2.0,
            min_length: 5,
            max_length: 15,
            change_rate: 0.3,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub y: f64,
    pub speed: f64,
    /// Head first.
    pub digits: Vec<char>,
    /// Head flashes white on this frame.
    pub flash: bool,
}

pub struct DigitalWaterfall {
    config: Config,
    height: u16,
    columns: Vec<Column>,
    rng: StdRng,
}

fn digit(rng: &mut StdRng) -> char {
    char::from(b'0' + rng.random_range(0..10u8))
}

impl DigitalWaterfall {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let mut wf = Self {
            config,
            height,
            columns: Vec::new(),
            rng,
        };
        wf.columns = (0..width).map(|_| wf.column(true)).collect();
        wf
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// A new column above the top edge, staggered when `initial`.
    fn column(&mut self, initial: bool) -> Column {
        let c = self.config;
        let len = self.rng.random_range(c.min_length..=c.max_length.max(c.min_length));
        let y = if initial {
            -(self.rng.random_range(0..self.height.max(1)) as f64)
        } else {
            -(len as f64)
        };
        Column {
            y,
            speed: self.rng.random_range(c.min_speed..c.max_speed),
            digits: (0..len).map(|_| digit(&mut self.rng)).collect(),
            flash: false,
        }
    }
}

fn brightness_color(b: f64) -> Rgb {
    if b > 0.8 {
        palette::LIME
    } else if b > 0.5 {
        palette::GREEN
    } else if b > 0.2 {
        palette::DARK_GREEN
    } else {
        palette::GRAY
    }
}

impl Simulation for DigitalWaterfall {
    fn update(&mut self, dt: f64) {
        let frames = dt * self.config.fps as f64;
        let height = self.height as f64;
        let change = crate::scaled_chance(self.config.change_rate, frames);
        let flash = crate::scaled_chance(HEAD_FLASH, frames);
        for i in 0..self.columns.len() {
            let col = &mut self.columns[i];
            col.y += col.speed * frames;
            if self.rng.random::<f64>() < change {
                let d = digit(&mut self.rng);
                if let Some(head) = self.columns[i].digits.first_mut() {
                    *head = d;
                }
            }
            self.columns[i].flash = self.rng.random::<f64>() < flash;

            let col = &self.columns[i];
            if col.y - col.digits.len() as f64 > height {
                self.columns[i] = self.column(false);
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        for (x, col) in self.columns.iter().enumerate() {
            let head = col.y as i32;
            let len = col.digits.len();
            for (i, &d) in col.digits.iter().enumerate() {
                let brightness = 1.0 - i as f64 / len as f64;
                let style = if i == 0 {
                    let color = if col.flash { palette::WHITE } else { palette::LIME };
                    CellStyle::fg(color).bold()
                } else {
                    CellStyle::fg(brightness_color(brightness))
                };
                surface.set_cell(x as i32, head - i as i32, d, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.height = height;
        let width = width as usize;
        if width < self.columns.len() {
            self.columns.truncate(width);
        } else {
            while self.columns.len() < width {
                let col = self.column(true);
                self.columns.push(col);
            }
        }
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "数字瀑布", "Digital Waterfall")
        .description(
            "数字字符如瀑布般倾泻而下,形成数字雨效果",
            "Digital characters cascading down like a waterfall",
        )
        .long_description("每一列都有一串数字以不同速度落下，头部明亮闪烁，尾部逐渐暗淡。")
        .tags(&["数字", "瀑布", "动画"])
}

pub fn effect_with(config: Config) -> SimulationEffect<DigitalWaterfall> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(DigitalWaterfall::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn waterfall() -> DigitalWaterfall {
        DigitalWaterfall::new(30, 20, Config::default(), StdRng::seed_from_u64(6))
    }

    #[test]
    fn one_column_per_screen_column() {
        let wf = waterfall();
        assert_eq!(wf.columns().len(), 30);
        for c in wf.columns() {
            assert!(c.y <= 0.0 && c.y > -20.0);
            assert!((5..=15).contains(&c.digits.len()));
            assert!(c.digits.iter().all(char::is_ascii_digit));
        }
    }

    #[test]
    fn columns_recycle_above_the_top() {
        let mut wf = waterfall();
        for _ in 0..600 {
            wf.update(1.0 / 30.0);
        }
        for c in wf.columns() {
            assert!(c.y - c.digits.len() as f64 <= 20.0);
        }
    }

    #[test]
    fn zero_length_tick_changes_nothing() {
        let mut wf = waterfall();
        let before = wf.columns().to_vec();
        for _ in 0..50 {
            wf.update(0.0);
        }
        assert_eq!(wf.columns(), &before[..]);
    }

    #[test]
    fn head_changes_scale_with_elapsed_time() {
        let config = Config {
            change_rate: 0.3,
            min_length: 1,
            max_length: 1,
            ..Config::default()
        };
        let count_changes = |fps: u32, ticks: usize| {
            let config = Config { fps, ..config };
            let mut wf = DigitalWaterfall::new(200, 1000, config, StdRng::seed_from_u64(8));
            let mut changes = 0;
            for _ in 0..ticks {
                let before: Vec<char> = wf.columns().iter().map(|c| c.digits[0]).collect();
                wf.update(1.0 / 60.0);
                changes += wf
                    .columns()
                    .iter()
                    .zip(&before)
                    .filter(|(c, b)| c.digits[0] != **b)
                    .count();
            }
            changes
        };
        // a 1/60 s tick is half a nominal frame at 30 fps and a whole one at 60
        let at_30 = count_changes(30, 60) as f64;
        let at_60 = count_changes(60, 60) as f64;
        assert!(at_60 > at_30 * 1.5, "{at_30} vs {at_60}");
    }

    #[test]
    fn resize_tracks_width() {
        let mut wf = waterfall();
        wf.resize(10, 20);
        assert_eq!(wf.columns().len(), 10);
        wf.resize(50, 20);
        assert_eq!(wf.columns().len(), 50);
    }
}
