//! Engine properties checked through the facade crate.

use rand::rngs::StdRng;
use rand::SeedableRng;

use symbol_move::core::{FrameBuffer, Simulation, Surface};
use symbol_move::engine::life::GameOfLife;
use symbol_move::engine::particle::Particle;
use symbol_move::engine::ripple;
use symbol_move::engine::snake::{self, Direction, Point, SnakeAi};
use symbol_move::engine::tetris::{best_placement, Board, Tetromino, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn lone_cell_dies_and_block_is_still() {
    let mut lone = GameOfLife::from_rows(&["...", ".#.", "..."]);
    lone.step();
    assert_eq!(lone.live_count(), 0);

    let rows = ["......", ".##...", ".##...", "......", "......"];
    let mut block = GameOfLife::from_rows(&rows);
    let before = block.cells().to_vec();
    for _ in 0..3 {
        block.step();
    }
    assert_eq!(block.cells(), &before[..]);
    assert_eq!(block.generation(), 3);
}

#[test]
fn snake_heads_down_towards_food_below() {
    let mut ai = SnakeAi::new(20, 20, snake::Config::default(), StdRng::seed_from_u64(1));
    let body = [Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];
    ai.place(&body, Direction::Right, Point::new(5, 8));

    let path = ai.find_path().unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(ai.decide(), Direction::Down);
}

#[test]
fn o_piece_rests_on_the_floor_without_holes() {
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let best = best_placement(&board, Tetromino::O, 0).unwrap();
    assert_eq!(best.holes, 0);
    assert_eq!(best.row, (BOARD_HEIGHT - Tetromino::O.height()) as i32);
}

#[test]
fn particle_expiry_depends_only_on_total_time() {
    for (dt, steps) in [(0.5, 4), (0.25, 8), (0.0625, 32), (0.4, 5), (2.0 / 3.0, 3)] {
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.5);
        for _ in 0..steps - 1 {
            p.step(dt, 0.0);
        }
        assert!(p.is_alive());
        p.step(dt, 0.0);
        assert!(!p.is_alive());
    }
}

#[test]
fn ripple_amplitude_on_and_off_the_front() {
    let config = ripple::Config::default();
    // at impact the profile is a plain sine
    assert!(config.amplitude(0.0, 0.0).abs() < 1e-12);
    assert!((config.amplitude(1.0, 0.0) - 0.5_f64.sin() / 1.1).abs() < 1e-12);

    // front at 3 cells after one second, band 3
    assert_eq!(config.amplitude(6.0, 1.0), 0.0);
    let r: f64 = 4.0;
    let t: f64 = 1.0;
    let expected = (0.5 * r - 3.0 * t).sin() / (1.0 + r / 10.0) * (-0.3 * t).exp();
    assert!((config.amplitude(r, t) - expected).abs() < 1e-12);
}

#[test]
fn ripple_render_is_idempotent() {
    let mut water = ripple::WaterRipple::new(40, 20, ripple::Config::default(), StdRng::seed_from_u64(9));
    water.add_drop(ripple::Drop::new(20, 10, 25.0));
    water.update(1.0);

    let mut a = FrameBuffer::new(40, 20);
    let mut b = FrameBuffer::new(40, 20);
    water.render(&mut a);
    water.render(&mut b);
    assert_eq!(a.cells(), b.cells());
    assert!(a.non_blank_count() > 0);
    b.clear();
    assert_eq!(b.non_blank_count(), 0);
}
