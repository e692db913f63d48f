//! Point particles shared by the physics effects.
//!
//! Integration is explicit Euler: velocity picks up gravity first, then the
//! position moves by the new velocity, then life decays linearly. Life is
//! derived from the accumulated age rather than decremented per step, so
//! expiry depends only on the summed `dt`.

use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining life; the particle is dead at or below zero.
    pub life: f64,
    /// Life lost per second.
    pub decay: f64,
    initial_life: f64,
    age: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, life: f64, decay: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            life,
            decay,
            initial_life: life,
            age: 0.0,
        }
    }

    /// Seconds since spawn.
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Advance by `dt` seconds under downward `gravity` (cells/s²).
    pub fn step(&mut self, dt: f64, gravity: f64) {
        self.vy += gravity * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.age += dt;
        self.life = self.initial_life - self.decay * self.age;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn in_bounds(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x < width as f64 && self.y < height as f64
    }

    /// Integer cell under the particle.
    pub fn cell(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// Radial burst parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub speed: Range<f64>,
    pub life: Range<f64>,
    pub decay: Range<f64>,
}

impl Burst {
    /// Particles leaving `(x, y)` at uniformly random angles.
    pub fn spawn<R: Rng + ?Sized>(&self, x: f64, y: f64, rng: &mut R) -> Vec<Particle> {
        (0..self.count)
            .map(|_| {
                let angle = rng.random::<f64>() * TAU;
                let speed = sample(rng, &self.speed);
                Particle::new(
                    x,
                    y,
                    speed * angle.cos(),
                    speed * angle.sin(),
                    sample(rng, &self.life),
                    sample(rng, &self.decay),
                )
            })
            .collect()
    }
}

/// Uniform sample; a degenerate range yields its start.
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.end > range.start {
        rng.random_range(range.clone())
    } else {
        range.start
    }
}

/// Step every particle and drop the dead and escaped ones.
pub fn step_all(particles: &mut Vec<Particle>, dt: f64, gravity: f64, width: u16, height: u16) {
    particles.retain_mut(|p| {
        p.step(dt, gravity);
        p.is_alive() && p.in_bounds(width, height)
    });
}
