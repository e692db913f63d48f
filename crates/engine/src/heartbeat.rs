//! A pulsing ASCII heart.

use std::f64::consts::TAU;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "heartbeat";

const HEART: [&str; 11] = [
    "    ██   ██    ",
    "  ██ ██ ██ ██  ",
    " ██   ███   ██ ",
    "██           ██",
    " ██         ██ ",
    "  ██       ██  ",
    "   ██     ██   ",
    "    ██   ██    ",
    "     ██ ██     ",
    "      ███      ",
    "       █       ",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub bpm: u32,
    /// Peak deviation from the resting size (0.3 = ±30%).
    pub max_scale: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bpm: 72,
            max_scale: 0.3,
            fps: 30,
        }
    }
}

pub struct Heartbeat {
    config: Config,
    width: u16,
    height: u16,
    time: f64,
}

impl Heartbeat {
    pub fn new(width: u16, height: u16, config: Config) -> Self {
        Self {
            config,
            width,
            height,
            time: 0.0,
        }
    }

    pub fn scale(&self) -> f64 {
        let phase = TAU * self.config.bpm as f64 / 60.0 * self.time;
        1.0 + self.config.max_scale * phase.sin()
    }
}

impl Simulation for Heartbeat {
    fn update(&mut self, dt: f64) {
        self.time += dt;
    }

    fn render(&self, surface: &mut dyn Surface) {
        let scale = self.scale();
        let color = if scale > 1.15 {
            palette::RED
        } else if scale > 1.05 {
            palette::LIGHT_CORAL
        } else {
            palette::DARK_RED
        };
        let style = CellStyle::fg(color).bold();

        let cx = self.width as i32 / 2;
        let cy = self.height as i32 / 2;
        let art_h = HEART.len() as f64;
        let art_w = HEART[0].chars().count() as f64;

        for (i, line) in HEART.iter().enumerate() {
            let y = cy + ((i as f64 - art_h / 2.0) * scale).floor() as i32;
            for (j, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = cx + ((j as f64 - art_w / 2.0) * scale).floor() as i32;
                surface.set_cell(x, y, ch, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "心跳动画", "Heartbeat")
        .description("跳动的爱心，随心率节奏缩放", "A beating heart pulsing to the heart rate")
        .long_description("ASCII爱心按每分钟72次的节奏放大缩小，越大颜色越鲜红。")
        .tags(&["爱心", "动画", "节奏"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Heartbeat> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(Heartbeat::new(w, h, config))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
