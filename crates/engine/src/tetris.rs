//! Self-playing tetris.
//!
//! On every gravity tick the AI picks a column for the falling piece: for each
//! column where the piece fits it drops the piece all the way down, counts the
//! holes it would leave and scores the result. The piece then jumps to the
//! best column and falls one row.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "tetris-auto";

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

const ELEVATION_WEIGHT: i32 = 10;
const HOLE_WEIGHT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Rows per second.
    pub fall_speed: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fall_speed: 2.0,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    /// Rows of the spawn orientation; `1` marks a filled cell.
    pub fn shape(self) -> &'static [&'static [u8]] {
        match self {
            Tetromino::I => &[&[1, 1, 1, 1]],
            Tetromino::O => &[&[1, 1], &[1, 1]],
            Tetromino::T => &[&[0, 1, 0], &[1, 1, 1]],
            Tetromino::S => &[&[0, 1, 1], &[1, 1, 0]],
            Tetromino::Z => &[&[1, 1, 0], &[0, 1, 1]],
            Tetromino::J => &[&[1, 0, 0], &[1, 1, 1]],
            Tetromino::L => &[&[0, 0, 1], &[1, 1, 1]],
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Tetromino::I => palette::LIGHT_CYAN,
            Tetromino::O => palette::YELLOW,
            Tetromino::T => palette::PURPLE,
            Tetromino::S => palette::GREEN,
            Tetromino::Z => palette::RED,
            Tetromino::J => palette::BLUE,
            Tetromino::L => palette::ORANGE,
        }
    }

    pub fn width(self) -> usize {
        self.shape()[0].len()
    }

    pub fn height(self) -> usize {
        self.shape().len()
    }

    /// Filled cells as `(dx, dy)` offsets.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        self.shape().iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c != 0)
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }
}

/// Shuffled 7-bag: every piece appears once per seven draws.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    pending: Vec<Tetromino>,
}

impl Bag {
    pub fn next(&mut self, rng: &mut StdRng) -> Tetromino {
        if self.pending.is_empty() {
            self.pending = Tetromino::ALL.to_vec();
            self.pending.shuffle(rng);
        }
        // refilled above, never empty here
        self.pending.pop().unwrap_or(Tetromino::I)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: Tetromino,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// A piece at the spawn position of a board `board_width` wide.
    pub fn spawn(kind: Tetromino, board_width: usize) -> Self {
        Self {
            kind,
            x: board_width as i32 / 2 - kind.width() as i32 / 2,
            y: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Rgb>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    pub fn set(&mut self, x: i32, y: i32, color: Option<Rgb>) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = color;
        }
    }

    /// Whether `kind` fits with its top-left corner at `(x, y)`. Cells above
    /// the top edge are allowed.
    pub fn fits(&self, kind: Tetromino, x: i32, y: i32) -> bool {
        kind.cells().all(|(dx, dy)| {
            let (px, py) = (x + dx, y + dy);
            px >= 0
                && (px as usize) < self.width
                && py < self.height as i32
                && (py < 0 || !self.is_filled(px, py))
        })
    }

    /// Resting row for `kind` dropped straight down from `(x, y)`.
    pub fn drop_row(&self, kind: Tetromino, x: i32, y: i32) -> i32 {
        let mut row = y;
        while self.fits(kind, x, row + 1) {
            row += 1;
        }
        row
    }

    /// Empty cells below the piece's lowest cell in each column it covers,
    /// down to the first filled cell or the floor.
    pub fn holes_below(&self, kind: Tetromino, x: i32, y: i32) -> usize {
        let mut lowest = vec![None::<i32>; kind.width()];
        for (dx, dy) in kind.cells() {
            let slot = &mut lowest[dx as usize];
            *slot = Some(slot.map_or(dy, |d: i32| d.max(dy)));
        }

        let mut holes = 0;
        for (dx, dy) in lowest.into_iter().enumerate() {
            let Some(dy) = dy else { continue };
            let col = x + dx as i32;
            let mut cy = y + dy + 1;
            while cy < self.height as i32 && !self.is_filled(col, cy) {
                holes += 1;
                cy += 1;
            }
        }
        holes
    }

    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.kind.color();
        for (dx, dy) in piece.kind.cells() {
            self.set(piece.x + dx, piece.y + dy, Some(color));
        }
    }

    /// Remove full rows, shifting everything above down. Returns the count.
    pub fn clear_lines(&mut self) -> usize {
        let w = self.width;
        let kept: Vec<Option<Rgb>> = self
            .cells
            .chunks(w)
            .filter(|row| row.iter().any(Option::is_none))
            .flatten()
            .copied()
            .collect();
        let cleared = self.cells.len() - kept.len();
        let mut cells = vec![None; cleared];
        cells.extend(kept);
        self.cells = cells;
        cleared / w.max(1)
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// A candidate landing spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    /// Settled row of the piece's top edge.
    pub row: i32,
    pub holes: usize,
    pub score: i32,
}

/// Best column for `kind` starting from row `y`. Higher scores win; ties keep
/// the leftmost column.
pub fn best_placement(board: &Board, kind: Tetromino, y: i32) -> Option<Placement> {
    let mut best: Option<Placement> = None;
    for x in 0..board.width() as i32 {
        if !board.fits(kind, x, y) {
            continue;
        }
        let row = board.drop_row(kind, x, y);
        let holes = board.holes_below(kind, x, row);
        let elevation = board.height() as i32 - kind.height() as i32 - row;
        let score = -ELEVATION_WEIGHT * elevation - HOLE_WEIGHT * holes as i32;
        if best.map_or(true, |b| score > b.score) {
            best = Some(Placement {
                x,
                row,
                holes,
                score,
            });
        }
    }
    best
}

pub struct TetrisAuto {
    config: Config,
    board: Board,
    current: Piece,
    bag: Bag,
    fall_timer: f64,
    lines: usize,
    games: u32,
    rng: StdRng,
}

impl TetrisAuto {
    pub fn new(config: Config, mut rng: StdRng) -> Self {
        let mut bag = Bag::default();
        let kind = bag.next(&mut rng);
        Self {
            config,
            board: Board::new(BOARD_WIDTH, BOARD_HEIGHT),
            current: Piece::spawn(kind, BOARD_WIDTH),
            bag,
            fall_timer: 0.0,
            lines: 0,
            games: 1,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Games played, including the current one.
    pub fn games(&self) -> u32 {
        self.games
    }

    /// One gravity tick: steer, then fall or lock.
    pub fn tick(&mut self) {
        let kind = self.current.kind;
        if let Some(best) = best_placement(&self.board, kind, self.current.y) {
            self.current.x = best.x;
        }

        if self.board.fits(kind, self.current.x, self.current.y + 1) {
            self.current.y += 1;
            return;
        }

        self.board.lock(&self.current);
        self.lines += self.board.clear_lines();

        let next = self.bag.next(&mut self.rng);
        self.current = Piece::spawn(next, self.board.width());
        if !self.board.fits(next, self.current.x, self.current.y) {
            log::debug!("tetris board topped out after {} lines", self.lines);
            self.board.clear();
            self.lines = 0;
            self.games += 1;
        }
    }
}

impl Simulation for TetrisAuto {
    fn update(&mut self, dt: f64) {
        self.fall_timer += dt;
        if self.fall_timer >= 1.0 / self.config.fall_speed {
            self.fall_timer = 0.0;
            self.tick();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let (w, h) = surface.size();
        let (bw, bh) = (self.board.width() as i32, self.board.height() as i32);
        let ox = (w as i32 - bw * 2) / 2;
        let oy = (h as i32 - bh) / 2;

        let border = CellStyle::fg(palette::WHITE);
        for y in 0..bh {
            surface.set_cell(ox - 1, oy + y, '│', border);
            surface.set_cell(ox + bw * 2, oy + y, '│', border);
        }
        for x in -1..=bw * 2 {
            surface.set_cell(ox + x, oy + bh, '─', border);
        }

        let mut block = |x: i32, y: i32, color: Rgb| {
            let style = CellStyle::fg(color);
            surface.set_cell(ox + x * 2, oy + y, '█', style);
            surface.set_cell(ox + x * 2 + 1, oy + y, '█', style);
        };
        for y in 0..bh {
            for x in 0..bw {
                if let Some(color) = self.board.get(x, y) {
                    block(x, y, color);
                }
            }
        }
        let piece = self.current;
        for (dx, dy) in piece.kind.cells() {
            if piece.y + dy >= 0 {
                block(piece.x + dx, piece.y + dy, piece.kind.color());
            }
        }

        let info = format!("Lines: {}", self.lines);
        surface.put_str(ox + bw * 2 + 3, oy + 1, &info, border);
    }

    fn resize(&mut self, _width: u16, _height: u16) {}
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "俄罗斯方块AI", "Tetris AI")
        .description("AI自动玩俄罗斯方块", "Tetris that plays itself with a greedy placement AI")
        .long_description("每次下落前AI逐列评估落点：越低越好，并惩罚方块下方留下的空洞；满行消除，堆满后重新开始。")
        .tags(&["游戏", "AI", "经典"])
}

pub fn effect_with(config: Config) -> SimulationEffect<TetrisAuto> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        let (min_w, min_h) = (BOARD_WIDTH as u16 * 2 + 2, BOARD_HEIGHT as u16 + 1);
        if w < min_w || h < min_h {
            return Err(EffectError::surface_too_small(w, h, min_w, min_h));
        }
        Ok(TetrisAuto::new(config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
