//! Conway's Game of Life on a torus.
//!
//! Two same-shaped generation buffers; each step writes the inactive one from
//! the active one, then swaps the index.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "game-of-life";

pub const LIVE_GLYPH: char = '●';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Chance that a cell starts alive.
    pub init_density: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            init_density: 0.3,
            fps: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameOfLife {
    width: usize,
    height: usize,
    buffers: [Vec<bool>; 2],
    active: usize,
    generation: u64,
}

impl GameOfLife {
    /// Random soup with the configured density.
    pub fn random(width: u16, height: u16, config: &Config, rng: &mut StdRng) -> Self {
        let (w, h) = (width as usize, height as usize);
        let cells = (0..w * h)
            .map(|_| rng.random::<f64>() < config.init_density)
            .collect();
        Self::from_cells(w, h, cells)
    }

    /// Grid from text rows; `#` or `●` is alive, anything else dead.
    ///
    /// Rows shorter than the widest row are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut cells = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                cells[y * width + x] = ch == '#' || ch == LIVE_GLYPH;
            }
        }
        Self::from_cells(width, height, cells)
    }

    fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        let spare = vec![false; cells.len()];
        Self {
            width,
            height,
            buffers: [cells, spare],
            active: 0,
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cells(&self) -> &[bool] {
        &self.buffers[self.active]
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells()[y * self.width + x]
    }

    pub fn live_count(&self) -> usize {
        self.cells().iter().filter(|&&c| c).count()
    }

    /// Live neighbours of `(x, y)` with wrap-around edges.
    pub fn neighbors(&self, x: usize, y: usize) -> u8 {
        let cells = self.cells();
        let mut count = 0;
        for dy in [self.height - 1, 0, 1] {
            for dx in [self.width - 1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x + dx) % self.width;
                let ny = (y + dy) % self.height;
                count += cells[ny * self.width + nx] as u8;
            }
        }
        count
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let next = 1 - self.active;
        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let n = self.neighbors(x, y);
                let alive = self.buffers[self.active][i];
                self.buffers[next][i] = matches!((alive, n), (true, 2) | (_, 3));
            }
        }
        self.active = next;
        self.generation += 1;
    }
}

impl Simulation for GameOfLife {
    fn update(&mut self, _dt: f64) {
        self.step();
    }

    fn render(&self, surface: &mut dyn Surface) {
        let style = CellStyle::fg(palette::GREEN);
        for (i, &alive) in self.cells().iter().enumerate() {
            if alive {
                let x = (i % self.width) as i32;
                let y = (i / self.width) as i32;
                surface.set_cell(x, y, LIVE_GLYPH, style);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        // Keep the overlapping region; new area starts dead.
        let (w, h) = (width as usize, height as usize);
        let mut cells = vec![false; w * h];
        for y in 0..h.min(self.height) {
            for x in 0..w.min(self.width) {
                cells[y * w + x] = self.is_alive(x, y);
            }
        }
        let generation = self.generation;
        *self = Self::from_cells(w, h, cells);
        self.generation = generation;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "生命游戏", "Game of Life")
        .description(
            "Conway's Game of Life细胞自动机,随机初始状态",
            "Conway's Game of Life cellular automaton with random initial state",
        )
        .long_description("经典细胞自动机，随机初始状态，边界循环，绿色细胞显示。")
        .tags(&["算法", "自动机", "经典", "模拟"])
}

pub fn effect_with(config: Config) -> SimulationEffect<GameOfLife> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(GameOfLife::random(w, h, &config, &mut crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn lone_cell_dies_on_small_torus() {
        let mut life = GameOfLife::from_rows(&["...", ".#.", "..."]);
        life.step();
        assert_eq!(life.live_count(), 0);
    }

    #[test]
    fn block_is_fixed_point() {
        let mut life = GameOfLife::from_rows(&["......", ".##...", ".##...", "......"]);
        let before = life.cells().to_vec();
        life.step();
        assert_eq!(life.cells(), before.as_slice());
        life.step();
        assert_eq!(life.cells(), before.as_slice());
    }

    #[test]
    fn blinker_oscillates() {
        let mut life = GameOfLife::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]);
        life.step();
        assert!(life.is_alive(1, 2) && life.is_alive(2, 2) && life.is_alive(3, 2));
        assert_eq!(life.live_count(), 3);
        life.step();
        assert!(life.is_alive(2, 1) && life.is_alive(2, 3));
        assert_eq!(life.generation(), 2);
    }

    #[test]
    fn neighbours_wrap_around_edges() {
        let life = GameOfLife::from_rows(&["#...#", ".....", ".....", "#...#"]);
        assert_eq!(life.neighbors(0, 0), 3);
    }

    #[test]
    fn random_soup_respects_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let none = GameOfLife::random(20, 10, &Config { init_density: 0.0, fps: 10 }, &mut rng);
        let all = GameOfLife::random(20, 10, &Config { init_density: 1.0, fps: 10 }, &mut rng);
        assert_eq!(none.live_count(), 0);
        assert_eq!(all.live_count(), 200);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut life = GameOfLife::from_rows(&["##", "##"]);
        life.resize(3, 1);
        assert_eq!((life.width(), life.height()), (3, 1));
        assert!(life.is_alive(0, 0) && life.is_alive(1, 0) && !life.is_alive(2, 0));
    }
}
