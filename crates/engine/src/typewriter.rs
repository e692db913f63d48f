//! Code typed out line by line with light syntax colouring.
//!
//! A new line starts at the top every interval and pushes the older ones
//! down; lines that fall off the bottom are dropped.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "typewriter-code";

const TEMPLATES: [&str; 25] = [
    "func main() {",
    "    for i := 0; i < 10; i++ {",
    "        fmt.Println(i)",
    "    }",
    "}",
    "package main",
    "import \"fmt\"",
    "class Example:",
    "    def __init__(self):",
    "        self.value = 42",
    "    def process(self):",
    "        return self.value * 2",
    "const express = require('express');",
    "const app = express();",
    "app.get('/', (req, res) => {",
    "    res.send('Hello World!');",
    "});",
    "if err != nil {",
    "    return err",
    "for _, item := range items {",
    "    process(item)",
    "let result = data.filter(x => x > 0)",
    "async function fetchData() {",
    "    const response = await fetch(url);",
    "    return response.json();",
];

const KEYWORDS: [&str; 11] = [
    "func", "for", "if", "return", "class", "def", "const", "let", "async", "import", "package",
];

const CURSOR: char = '▌';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Characters per second at speed factor 1.
    pub typing_speed: f64,
    /// Seconds between new lines.
    pub line_interval: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typing_speed: 20.0,
            line_interval: 0.5,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeLine {
    pub chars: Vec<char>,
    pub y: i32,
    /// Characters typed so far, fractional.
    pub progress: f64,
    /// Per-line speed factor.
    pub speed: f64,
}

impl CodeLine {
    pub fn new(text: &str, speed: f64) -> Self {
        Self {
            chars: text.chars().collect(),
            y: 0,
            progress: 0.0,
            speed,
        }
    }

    pub fn typed(&self) -> usize {
        (self.progress as usize).min(self.chars.len())
    }

    pub fn is_finished(&self) -> bool {
        self.typed() == self.chars.len()
    }
}

/// Colour of the character at `pos`. Keyword matches are prefix matches
/// starting at `pos`.
pub fn color_at(chars: &[char], pos: usize) -> Rgb {
    let rest = &chars[pos..];
    let is_keyword = KEYWORDS.iter().any(|k| {
        k.chars().count() <= rest.len() && k.chars().zip(rest).all(|(a, b)| a == *b)
    });
    if is_keyword {
        return palette::YELLOW;
    }
    match chars[pos] {
        '"' | '\'' => palette::GREEN,
        '0'..='9' => palette::LIGHT_CYAN,
        '(' | ')' | '{' | '}' | '[' | ']' => palette::PURPLE,
        _ => palette::WHITE,
    }
}

pub struct Typewriter {
    config: Config,
    width: u16,
    height: u16,
    lines: Vec<CodeLine>,
    since_line: f64,
    rng: StdRng,
}

impl Typewriter {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self {
            config,
            width,
            height,
            lines: Vec::new(),
            since_line: 0.0,
            rng,
        }
    }

    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    /// Start a line at the top, shifting the rest down.
    pub fn push_line(&mut self, line: CodeLine) {
        let height = self.height as i32;
        self.lines.retain(|l| l.y + 1 < height);
        for l in &mut self.lines {
            l.y += 1;
        }
        self.lines.insert(0, line);
    }

    fn random_line(&mut self) -> CodeLine {
        let text = TEMPLATES.choose(&mut self.rng).copied().unwrap_or("");
        let speed = self.rng.random_range(0.8..1.2);
        CodeLine::new(text, speed)
    }
}

impl Simulation for Typewriter {
    fn update(&mut self, dt: f64) {
        self.since_line += dt;
        if self.since_line >= self.config.line_interval {
            self.since_line = 0.0;
            let line = self.random_line();
            self.push_line(line);
        }

        let cps = self.config.typing_speed;
        for line in self.lines.iter_mut().filter(|l| !l.is_finished()) {
            line.progress = (line.progress + dt * cps * line.speed).min(line.chars.len() as f64);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let width = self.width as i32;
        for line in &self.lines {
            let typed = line.typed();
            let finished = line.is_finished();
            for i in 0..typed.min(self.width as usize) {
                let mut style = CellStyle::fg(color_at(&line.chars, i));
                if i + 1 == typed && !finished {
                    style = style.bold();
                }
                surface.set_cell(i as i32, line.y, line.chars[i], style);
            }
            if !finished && (typed as i32) < width {
                let cursor = CellStyle::fg(palette::WHITE).bold();
                surface.set_cell(typed as i32, line.y, CURSOR, cursor);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let h = height as i32;
        self.lines.retain(|l| l.y < h);
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "打字机代码雨", "Typewriter Code")
        .description(
            "模拟打字机逐字显示代码的效果",
            "Simulates typewriter-style code display character by character",
        )
        .long_description("多种编程语言的代码片段逐字符打出，带简单语法高亮和闪烁光标，新行从顶部不断涌入。")
        .tags(&["代码", "动画", "编程", "打字"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Typewriter> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(Typewriter::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
