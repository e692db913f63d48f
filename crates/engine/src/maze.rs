//! Animated recursive-backtracker maze.
//!
//! The carver starts in the top-left cell and walks to a random unvisited
//! neighbour, knocking down the wall between them; at a dead end it backtracks
//! along its stack. When the stack empties the maze is complete, it stays on
//! screen for a moment and a new one starts.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "maze-generator";

const TOP: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const LEFT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Screen cells per maze cell, both ways.
    pub cell_size: u16,
    /// Carving steps per frame.
    pub speed: u32,
    /// Seconds a finished maze stays before a new one starts.
    pub hold: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 2,
            speed: 5,
            hold: 3.0,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCell {
    pub visited: bool,
    /// Top, right, bottom, left.
    pub walls: [bool; 4],
}

impl Default for MazeCell {
    fn default() -> Self {
        Self {
            visited: false,
            walls: [true; 4],
        }
    }
}

pub struct Maze {
    config: Config,
    cols: usize,
    rows: usize,
    cells: Vec<MazeCell>,
    current: (usize, usize),
    stack: Vec<(usize, usize)>,
    done: bool,
    /// Fractional carving steps carried between updates.
    budget: f64,
    held: f64,
    rng: StdRng,
}

impl Maze {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        let size = config.cell_size.max(1);
        let mut maze = Self {
            config,
            cols: (width / size) as usize,
            rows: (height / size) as usize,
            cells: Vec::new(),
            current: (0, 0),
            stack: Vec::new(),
            done: false,
            budget: 0.0,
            held: 0.0,
            rng,
        };
        maze.restart();
        maze
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, x: usize, y: usize) -> MazeCell {
        self.cells[y * self.cols + x]
    }

    pub fn current(&self) -> (usize, usize) {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn restart(&mut self) {
        self.cells = vec![MazeCell::default(); self.cols * self.rows];
        self.current = (0, 0);
        self.stack.clear();
        self.done = self.cells.is_empty();
        self.budget = 0.0;
        self.held = 0.0;
        if let Some(first) = self.cells.first_mut() {
            first.visited = true;
        }
    }

    fn unvisited_neighbour(&mut self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        let mut options = ArrayVec::<(usize, usize), 4>::new();
        if y > 0 {
            options.push((x, y - 1));
        }
        if x + 1 < self.cols {
            options.push((x + 1, y));
        }
        if y + 1 < self.rows {
            options.push((x, y + 1));
        }
        if x > 0 {
            options.push((x - 1, y));
        }
        options.retain(|&mut (nx, ny)| !self.cells[ny * self.cols + nx].visited);
        options.choose(&mut self.rng).copied()
    }

    fn remove_wall(&mut self, from: (usize, usize), to: (usize, usize)) {
        let (a, b) = if to.0 > from.0 {
            (RIGHT, LEFT)
        } else if to.0 < from.0 {
            (LEFT, RIGHT)
        } else if to.1 > from.1 {
            (BOTTOM, TOP)
        } else {
            (TOP, BOTTOM)
        };
        let cols = self.cols;
        self.cells[from.1 * cols + from.0].walls[a] = false;
        self.cells[to.1 * cols + to.0].walls[b] = false;
    }

    /// One carving step: advance, backtrack or finish.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        match self.unvisited_neighbour(self.current) {
            Some(next) => {
                self.cells[next.1 * self.cols + next.0].visited = true;
                self.stack.push(self.current);
                self.remove_wall(self.current, next);
                self.current = next;
            }
            None => match self.stack.pop() {
                Some(prev) => self.current = prev,
                None => {
                    log::debug!("maze {}x{} complete", self.cols, self.rows);
                    self.done = true;
                }
            },
        }
    }
}

impl Simulation for Maze {
    fn update(&mut self, dt: f64) {
        if self.done {
            self.held += dt;
            if self.held >= self.config.hold && !self.cells.is_empty() {
                self.restart();
            }
            return;
        }
        self.budget += dt * self.config.fps as f64 * self.config.speed as f64;
        while self.budget >= 1.0 && !self.done {
            self.budget -= 1.0;
            self.step();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let size = self.config.cell_size.max(1) as i32;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let cell = self.cell(x, y);
                let color = if (x, y) == self.current && !self.done {
                    palette::YELLOW
                } else if cell.visited {
                    palette::GREEN
                } else {
                    palette::GRAY
                };
                let style = CellStyle::fg(color);
                let (sx, sy) = (x as i32 * size, y as i32 * size);
                if cell.walls[TOP] && sy > 0 {
                    for i in 0..size {
                        surface.set_cell(sx + i, sy, '─', style);
                    }
                }
                if cell.walls[RIGHT] {
                    for i in 0..size {
                        surface.set_cell(sx + size - 1, sy + i, '│', style);
                    }
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let size = self.config.cell_size.max(1);
        self.cols = (width / size) as usize;
        self.rows = (height / size) as usize;
        self.restart();
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "迷宫生成", "Maze Generator")
        .description("实时生成迷宫的动画效果", "Animated maze generation in real time")
        .long_description("使用深度优先的递归回溯算法逐步打通墙壁，黄色标记当前位置，完成后稍作停留再生成新的迷宫。")
        .tags(&["算法", "迷宫", "动画"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Maze> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        let size = config.cell_size.max(1);
        if w < size || h < size {
            return Err(EffectError::surface_too_small(w, h, size, size));
        }
        Ok(Maze::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn maze(w: u16, h: u16) -> Maze {
        Maze::new(w, h, Config::default(), StdRng::seed_from_u64(10))
    }

    fn finish(m: &mut Maze) -> usize {
        let mut steps = 0;
        while !m.is_done() {
            m.step();
            steps += 1;
        }
        steps
    }

    #[test]
    fn completes_in_two_steps_per_cell() {
        let mut m = maze(20, 10);
        assert_eq!(m.size(), (10, 5));
        // every cell is entered once and left once, plus the final step
        assert_eq!(finish(&mut m), 2 * (50 - 1) + 1);
        for y in 0..5 {
            for x in 0..10 {
                assert!(m.cell(x, y).visited);
            }
        }
    }

    #[test]
    fn finished_maze_is_a_spanning_tree() {
        let mut m = maze(24, 16);
        finish(&mut m);
        let (cols, rows) = m.size();

        let mut openings = 0;
        for y in 0..rows {
            for x in 0..cols {
                let c = m.cell(x, y);
                if !c.walls[RIGHT] {
                    assert!(x + 1 < cols);
                    assert!(!m.cell(x + 1, y).walls[LEFT]);
                    openings += 1;
                }
                if !c.walls[BOTTOM] {
                    assert!(y + 1 < rows);
                    assert!(!m.cell(x, y + 1).walls[TOP]);
                    openings += 1;
                }
            }
        }
        assert_eq!(openings, cols * rows - 1);

        // all cells reachable from the origin through the openings
        let mut seen = vec![false; cols * rows];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        seen[0] = true;
        while let Some((x, y)) = queue.pop_front() {
            let c = m.cell(x, y);
            let mut next = Vec::new();
            if !c.walls[TOP] {
                next.push((x, y - 1));
            }
            if !c.walls[RIGHT] {
                next.push((x + 1, y));
            }
            if !c.walls[BOTTOM] {
                next.push((x, y + 1));
            }
            if !c.walls[LEFT] {
                next.push((x - 1, y));
            }
            for (nx, ny) in next {
                if !seen[ny * cols + nx] {
                    seen[ny * cols + nx] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn restarts_after_hold() {
        let mut m = maze(10, 10);
        finish(&mut m);
        m.update(1.0);
        assert!(m.is_done());
        m.update(2.5);
        assert!(!m.is_done());
        assert_eq!(m.current(), (0, 0));
        assert!(!m.cell(1, 1).visited);
    }

    #[test]
    fn carves_speed_times_fps_steps_per_second() {
        let mut m = maze(200, 100);
        m.update(1.0 / 30.0);
        let visited = (0..50)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|&(x, y)| m.cell(x, y).visited)
            .count();
        // five forward steps on a fresh maze never hit a dead end
        assert!((2..=6).contains(&visited));
    }
}
