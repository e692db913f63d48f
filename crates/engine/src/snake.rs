//! Self-playing snake.
//!
//! Each move the AI runs a breadth-first search from the head to the food.
//! Neighbours are expanded in the fixed order down, up, right, left, so among
//! equally short paths the first one found in that order wins. When the food
//! is unreachable the snake picks a random safe move that is not a reversal;
//! with no safe move it keeps going and the resulting collision resets the
//! game.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle};

const ID: &str = "snake-ai";

/// Smallest playable board, in board cells.
pub const MIN_BOARD: (i32, i32) = (4, 4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Moves per second.
    pub speed: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 5.0,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Point {
        let (dx, dy) = dir.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// BFS expansion order.
    pub const SCAN: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    fn between(from: Point, to: Point) -> Option<Direction> {
        Direction::SCAN
            .into_iter()
            .find(|d| from.step(*d) == to)
    }
}

pub struct SnakeAi {
    config: Config,
    board_w: i32,
    board_h: i32,
    /// Head first.
    body: VecDeque<Point>,
    direction: Direction,
    food: Point,
    move_timer: f64,
    score: u32,
    resets: u32,
    rng: StdRng,
}

impl SnakeAi {
    /// Board sized for a `width`×`height` surface: cells are two columns wide
    /// and two rows are kept for the frame.
    pub fn for_surface(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self::new(width as i32 / 2, height as i32 - 2, config, rng)
    }

    pub fn new(board_w: i32, board_h: i32, config: Config, rng: StdRng) -> Self {
        let mut snake = Self {
            config,
            board_w,
            board_h,
            body: VecDeque::new(),
            direction: Direction::Right,
            food: Point::new(0, 0),
            move_timer: 0.0,
            score: 0,
            resets: 0,
            rng,
        };
        snake.reset();
        snake.resets = 0;
        snake
    }

    /// Replace the snake and food; used to set up specific positions.
    pub fn place(&mut self, body: &[Point], direction: Direction, food: Point) {
        self.body = body.iter().copied().collect();
        self.direction = direction;
        self.food = food;
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of collisions so far.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn board_size(&self) -> (i32, i32) {
        (self.board_w, self.board_h)
    }

    fn reset(&mut self) {
        let (cx, cy) = (self.board_w / 2, self.board_h / 2);
        self.body = (0..3).map(|i| Point::new(cx - i, cy)).collect();
        self.direction = Direction::Right;
        self.move_timer = 0.0;
        self.score = 0;
        self.resets += 1;
        self.spawn_food();
    }

    fn spawn_food(&mut self) {
        let free: Vec<Point> = (0..self.board_h)
            .flat_map(|y| (0..self.board_w).map(move |x| Point::new(x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        match free.choose(&mut self.rng) {
            Some(p) => self.food = *p,
            // board is full: start over
            None if self.body.len() > 3 => self.reset(),
            None => self.food = self.head(),
        }
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.board_w && p.y < self.board_h
    }

    /// Inside the board and not on the body. The tail counts as free because
    /// it moves away on the same step.
    pub fn is_safe(&self, p: Point) -> bool {
        if !self.in_bounds(p) {
            return false;
        }
        let len = self.body.len();
        !self.body.iter().take(len.saturating_sub(1)).any(|b| *b == p)
    }

    /// Shortest safe path from the head to the food, excluding the head.
    pub fn find_path(&self) -> Option<Vec<Point>> {
        let start = self.head();
        let w = self.board_w as usize;
        let idx = |p: Point| p.y as usize * w + p.x as usize;

        let mut visited = vec![false; w * self.board_h as usize];
        let mut parent: Vec<Option<Point>> = vec![None; visited.len()];
        let mut queue = VecDeque::from([start]);
        if self.in_bounds(start) {
            visited[idx(start)] = true;
        }

        while let Some(current) = queue.pop_front() {
            if current == self.food {
                let mut path = vec![current];
                let mut at = current;
                while let Some(prev) = parent[idx(at)] {
                    if prev == start {
                        break;
                    }
                    path.push(prev);
                    at = prev;
                }
                path.reverse();
                return Some(path);
            }
            for dir in Direction::SCAN {
                let next = current.step(dir);
                if self.is_safe(next) && !visited[idx(next)] {
                    visited[idx(next)] = true;
                    parent[idx(next)] = Some(current);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn random_safe_direction(&mut self) -> Direction {
        let head = self.head();
        let reverse = self.direction.opposite();
        let safe: ArrayVec<Direction, 4> = Direction::SCAN
            .into_iter()
            .filter(|d| *d != reverse && self.is_safe(head.step(*d)))
            .collect();
        safe.choose(&mut self.rng).copied().unwrap_or(self.direction)
    }

    /// The direction the AI takes next.
    pub fn decide(&mut self) -> Direction {
        let first = self
            .find_path()
            .and_then(|path| path.first().copied())
            .and_then(|step| Direction::between(self.head(), step));
        match first {
            Some(dir) => dir,
            None => self.random_safe_direction(),
        }
    }

    /// Make one move.
    pub fn advance(&mut self) {
        self.direction = self.decide();
        let head = self.head().step(self.direction);

        if !self.is_safe(head) {
            self.reset();
            return;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            self.spawn_food();
        } else {
            self.body.pop_back();
        }
    }
}

impl Simulation for SnakeAi {
    fn update(&mut self, dt: f64) {
        self.move_timer += dt;
        if self.move_timer >= 1.0 / self.config.speed {
            self.move_timer = 0.0;
            self.advance();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let (w, h) = surface.size();
        let ox = (w as i32 - self.board_w * 2) / 2;
        let oy = (h as i32 - self.board_h) / 2;

        let border = CellStyle::fg(palette::WHITE);
        for x in -1..=self.board_w * 2 {
            surface.set_cell(ox + x, oy - 1, '─', border);
            surface.set_cell(ox + x, oy + self.board_h, '─', border);
        }
        for y in 0..self.board_h {
            surface.set_cell(ox - 1, oy + y, '│', border);
            surface.set_cell(ox + self.board_w * 2, oy + y, '│', border);
        }

        for (i, p) in self.body.iter().enumerate() {
            let (ch, color) = if i == 0 {
                ('◉', palette::YELLOW)
            } else {
                ('●', palette::GREEN)
            };
            surface.set_cell(ox + p.x * 2, oy + p.y, ch, CellStyle::fg(color).bold());
        }

        let food = CellStyle::fg(palette::RED).bold();
        surface.set_cell(ox + self.food.x * 2, oy + self.food.y, '♥', food);

        let score = format!(" {} ", self.score);
        surface.put_str(ox + 1, oy - 1, &score, border);
    }

    fn resize(&mut self, width: u16, height: u16) {
        let (bw, bh) = (width as i32 / 2, height as i32 - 2);
        if bw >= MIN_BOARD.0 && bh >= MIN_BOARD.1 && (bw, bh) != (self.board_w, self.board_h) {
            self.board_w = bw;
            self.board_h = bh;
            self.reset();
        }
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "贪吃蛇AI", "Snake AI")
        .description("AI自动玩贪吃蛇游戏", "Snake that plays itself with BFS pathfinding")
        .long_description("AI使用广度优先搜索寻找通往食物的最短路径；无路可走时随机选择安全方向，撞到后重新开始。")
        .tags(&["游戏", "AI", "经典", "算法"])
}

pub fn effect_with(config: Config) -> SimulationEffect<SnakeAi> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        let (min_w, min_h) = (MIN_BOARD.0 as u16 * 2, MIN_BOARD.1 as u16 + 2);
        if w < min_w || h < min_h {
            return Err(EffectError::surface_too_small(w, h, min_w, min_h));
        }
        Ok(SnakeAi::for_surface(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn snake(w: i32, h: i32) -> SnakeAi {
        SnakeAi::new(w, h, Config::default(), StdRng::seed_from_u64(17))
    }

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn bfs_goes_down_first_on_open_board() {
        let mut s = snake(20, 20);
        s.place(&pts(&[(5, 5), (4, 5), (3, 5)]), Direction::Right, Point::new(5, 8));

        let path = s.find_path().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path, pts(&[(5, 6), (5, 7), (5, 8)]));
        assert_eq!(s.decide(), Direction::Down);
    }

    #[test]
    fn path_length_is_manhattan_without_obstacles() {
        let mut s = snake(20, 20);
        s.place(&pts(&[(5, 5), (4, 5), (3, 5)]), Direction::Right, Point::new(9, 2));
        let path = s.find_path().unwrap();
        assert_eq!(path.len(), 4 + 3);
        // down is useless here, up is scanned before right
        assert_eq!(s.decide(), Direction::Up);
        assert_eq!(path.last(), Some(&Point::new(9, 2)));
    }

    #[test]
    fn tail_cell_counts_as_free() {
        let mut s = snake(10, 10);
        s.place(&pts(&[(1, 1), (2, 1), (2, 2), (1, 2)]), Direction::Left, Point::new(8, 8));
        assert!(s.is_safe(Point::new(1, 2)));
        assert!(!s.is_safe(Point::new(2, 2)));
        assert!(!s.is_safe(Point::new(-1, 0)));
    }

    #[test]
    fn unreachable_food_picks_safe_non_reversing_move() {
        let mut s = snake(10, 10);
        // food walled in by the body in the top-left corner
        s.place(
            &pts(&[(3, 3), (2, 3), (1, 1), (0, 1), (1, 0), (1, 2), (3, 4)]),
            Direction::Right,
            Point::new(0, 0),
        );
        assert!(s.find_path().is_none());
        for _ in 0..20 {
            let dir = s.decide();
            assert_ne!(dir, Direction::Left);
            assert!(s.is_safe(s.head().step(dir)));
        }
    }

    #[test]
    fn boxed_in_snake_collides_and_resets() {
        let mut s = snake(5, 5);
        s.place(
            &pts(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)]),
            Direction::Left,
            Point::new(4, 4),
        );
        assert_eq!(s.decide(), Direction::Left);
        s.advance();
        assert_eq!(s.body().len(), 3);
        assert_eq!(s.head(), Point::new(2, 2));
        assert_eq!(s.resets(), 1);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn eating_grows_and_respawns_food() {
        let mut s = snake(10, 10);
        s.place(&pts(&[(5, 5), (4, 5), (3, 5)]), Direction::Right, Point::new(6, 5));
        s.advance();
        assert_eq!(s.body().len(), 4);
        assert_eq!(s.score(), 1);
        assert!(!s.body().contains(&s.food()));
    }

    #[test]
    fn moves_at_configured_rate() {
        let mut s = snake(10, 10);
        let start = s.head();
        s.update(0.1);
        assert_eq!(s.head(), start);
        s.update(0.1);
        assert_ne!(s.head(), start);
    }
}
