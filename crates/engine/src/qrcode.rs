//! Rotating QR codes drawn with two-column blocks.
//!
//! Every `change_interval` seconds the next content entry is encoded. A
//! module is two cells wide so it looks square in a terminal; the code is
//! scaled up to twice that when there is room, and centred with its text
//! underneath.

use chrono::{Local, NaiveDateTime, TimeDelta};
use log::warn;
use ::qrcode::{Color, EcLevel, QrCode};

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "qrcode-gen";

/// Light modules around the symbol on every side.
pub const QUIET_ZONE: usize = 2;

const DARK: char = '█';

/// One entry in the rotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    /// The current local time as `YYYY-MM-DD HH:MM:SS`.
    Clock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub contents: Vec<Content>,
    /// Seconds each code stays on screen.
    pub change_interval: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contents: vec![
                Content::Text("https://github.com/symbolmove/symbol_move".into()),
                Content::Text("SymbolMove - 符动世界".into()),
                Content::Text("终端特效展示".into()),
                Content::Clock,
            ],
            change_interval: 3.0,
            fps: 30,
        }
    }
}

/// Square module grid with the quiet zone included. `true` is dark.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Encode `text` at medium error correction.
    pub fn encode(text: &str) -> Result<Self, EffectError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
            .map_err(|e| EffectError::Init(format!("cannot encode {text:?}: {e}")))?;
        let inner = code.width();
        let size = inner + 2 * QUIET_ZONE;
        let mut modules = vec![false; size * size];
        for (i, color) in code.to_colors().into_iter().enumerate() {
            let (x, y) = (i % inner + QUIET_ZONE, i / inner + QUIET_ZONE);
            modules[y * size + x] = color == Color::Dark;
        }
        Ok(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }
}

/// Module scale for a `size`-module code on a `width`×`height` surface:
/// 2 when it fits doubled, otherwise 1 (clipped if even that is too big).
pub fn scale_for(size: usize, width: u16, height: u16) -> usize {
    if size == 0 {
        return 1;
    }
    let fit = (width as usize / 2 / size).min(height as usize / size);
    fit.clamp(1, 2)
}

pub struct QrShow {
    config: Config,
    width: u16,
    height: u16,
    started: NaiveDateTime,
    elapsed: f64,
    since_change: f64,
    index: usize,
    text: String,
    matrix: Matrix,
}

impl QrShow {
    /// Show starting at the first entry; `started` anchors `Content::Clock`.
    pub fn starting_at(
        width: u16,
        height: u16,
        config: Config,
        started: NaiveDateTime,
    ) -> Result<Self, EffectError> {
        if config.contents.is_empty() {
            return Err(EffectError::Init("no QR contents configured".into()));
        }
        let text = resolve(&config.contents[0], started);
        let matrix = Matrix::encode(&text)?;
        Ok(Self {
            config,
            width,
            height,
            started,
            elapsed: 0.0,
            since_change: 0.0,
            index: 0,
            text,
            matrix,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.config.contents.len();
        let now = self.started + TimeDelta::milliseconds((self.elapsed * 1000.0) as i64);
        let text = resolve(&self.config.contents[self.index], now);
        match Matrix::encode(&text) {
            Ok(matrix) => {
                self.matrix = matrix;
                self.text = text;
            }
            Err(e) => warn!("keeping previous QR code: {e}"),
        }
    }
}

fn resolve(content: &Content, now: NaiveDateTime) -> String {
    match content {
        Content::Text(s) => s.clone(),
        Content::Clock => now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

impl Simulation for QrShow {
    fn update(&mut self, dt: f64) {
        self.elapsed += dt;
        self.since_change += dt;
        if self.since_change >= self.config.change_interval {
            self.since_change = 0.0;
            self.advance();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let size = self.matrix.size();
        let scale = scale_for(size, self.width, self.height);
        let cell_w = (scale * 2) as i32;
        let cell_h = scale as i32;
        let display_w = size as i32 * cell_w;
        let display_h = size as i32 * cell_h;
        let x0 = (self.width as i32 - display_w) / 2;
        let y0 = (self.height as i32 - display_h) / 2;

        let dark = CellStyle::fg(palette::BLACK).with_bg(palette::WHITE);
        let light = CellStyle::fg(palette::WHITE).with_bg(palette::WHITE);
        for my in 0..size {
            for mx in 0..size {
                let (ch, style) = if self.matrix.is_dark(mx, my) {
                    (DARK, dark)
                } else {
                    (' ', light)
                };
                let x = x0 + mx as i32 * cell_w;
                let y = y0 + my as i32 * cell_h;
                surface.fill_rect(x, y, cell_w as u16, cell_h as u16, ch, style);
            }
        }

        let text_y = y0 + display_h + 2;
        if text_y < self.height as i32 {
            surface.put_str_centered(text_y, &self.text, CellStyle::fg(palette::WHITE));
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "二维码动画", "QR Code Animation")
        .description("生成并展示二维码动画", "Generates and displays animated QR codes")
        .long_description("定期切换不同内容的二维码，自动缩放以适应屏幕，黑白模块清晰渲染，下方显示当前内容文本。")
        .tags(&["实用", "二维码", "动画", "信息"])
}

pub fn effect_with(config: Config) -> SimulationEffect<QrShow> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        QrShow::starting_at(w, h, config.clone(), Local::now().naive_local())
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
