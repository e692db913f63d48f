//! Fireworks: shells rise under gravity and burst into particles.
//!
//! A shell launches from the bottom edge with an upward velocity that gravity
//! eats away. It bursts once it reaches its target altitude, or at its apex if
//! it runs out of speed first.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::particle::{self, Burst, Particle};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "fireworks";

const SHELL_COLORS: [Rgb; 6] = [
    palette::RED,
    palette::GREEN,
    palette::BLUE,
    palette::YELLOW,
    palette::PURPLE,
    palette::TEAL,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seconds between launches.
    pub launch_interval: f64,
    pub particles_per_burst: usize,
    /// Downward acceleration in cells/s².
    pub gravity: f64,
    /// Launch speed range (cells/s, upwards).
    pub launch_speed: std::ops::Range<f64>,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launch_interval: 1.5,
            particles_per_burst: 50,
            gravity: 20.0,
            launch_speed: 40.0..60.0,
            fps: 30,
        }
    }
}

/// A rising shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity; negative is up.
    pub vy: f64,
    pub target_y: f64,
    pub color: Rgb,
}

impl Shell {
    /// Integrate one step. Returns `true` when the shell should burst.
    pub fn ascend(&mut self, dt: f64, gravity: f64) -> bool {
        self.vy += gravity * dt;
        self.y += self.vy * dt;
        self.y <= self.target_y || self.vy >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Firework {
    Rising(Shell),
    Burst { particles: Vec<Particle>, color: Rgb },
}

pub struct Fireworks {
    config: Config,
    width: u16,
    height: u16,
    fireworks: Vec<Firework>,
    since_launch: f64,
    rng: StdRng,
}

impl Fireworks {
    pub fn new(width: u16, height: u16, config: Config, rng: StdRng) -> Self {
        Self {
            config,
            width,
            height,
            fireworks: Vec::new(),
            since_launch: 0.0,
            rng,
        }
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn launch(&mut self) {
        let quarter = (self.height / 4) as f64;
        let shell = Shell {
            x: self.rng.random_range(0..self.width.max(1)) as f64,
            y: self.height as f64,
            vy: -particle::sample(&mut self.rng, &self.config.launch_speed),
            target_y: quarter + self.rng.random::<f64>() * quarter,
            color: *SHELL_COLORS.choose(&mut self.rng).unwrap_or(&palette::WHITE),
        };
        self.fireworks.push(Firework::Rising(shell));
    }

    fn burst(&mut self, shell: &Shell) -> Firework {
        let burst = Burst {
            count: self.config.particles_per_burst,
            speed: 10.0..25.0,
            life: 1.0..1.0,
            decay: 0.5..1.0,
        };
        Firework::Burst {
            particles: burst.spawn(shell.x, shell.y, &mut self.rng),
            color: shell.color,
        }
    }
}

impl Simulation for Fireworks {
    fn update(&mut self, dt: f64) {
        self.since_launch += dt;
        if self.since_launch >= self.config.launch_interval {
            self.since_launch = 0.0;
            self.launch();
        }

        let gravity = self.config.gravity;
        let (w, h) = (self.width, self.height);
        let mut next = Vec::with_capacity(self.fireworks.len());
        for fw in std::mem::take(&mut self.fireworks) {
            match fw {
                Firework::Rising(mut shell) => {
                    if shell.ascend(dt, gravity) {
                        next.push(self.burst(&shell));
                    } else {
                        next.push(Firework::Rising(shell));
                    }
                }
                Firework::Burst {
                    mut particles,
                    color,
                } => {
                    particle::step_all(&mut particles, dt, gravity, w, h);
                    if !particles.is_empty() {
                        next.push(Firework::Burst { particles, color });
                    }
                }
            }
        }
        self.fireworks = next;
    }

    fn render(&self, surface: &mut dyn Surface) {
        for fw in &self.fireworks {
            match fw {
                Firework::Rising(shell) => {
                    let style = CellStyle::fg(shell.color).bold();
                    surface.set_cell(shell.x as i32, shell.y.floor() as i32, '●', style);
                }
                Firework::Burst { particles, color } => {
                    let style = CellStyle::fg(*color);
                    for p in particles {
                        let ch = if p.life > 0.7 {
                            '*'
                        } else if p.life > 0.4 {
                            '·'
                        } else {
                            '.'
                        };
                        let (x, y) = p.cell();
                        surface.set_cell(x, y, ch, style);
                    }
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "烟花绽放", "Fireworks")
        .description("模拟烟花绽放的粒子效果", "Particle fireworks bursting in the night sky")
        .long_description("烟花从底部升空，减速至目标高度后炸开成彩色粒子，粒子受重力下落并逐渐消逝。")
        .tags(&["粒子", "动画", "庆祝", "多彩"])
}

pub fn effect_with(config: Config) -> SimulationEffect<Fireworks> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h < 4 {
            return Err(EffectError::surface_too_small(w, h, 1, 4));
        }
        Ok(Fireworks::new(w, h, config.clone(), crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}
