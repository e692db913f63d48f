//! Simulation engines - one module per effect
//!
//! Every module exposes a `Config` with the effect's tuning constants, the
//! simulation state type (implementing [`core::Simulation`]), a `metadata()`
//! function and an `effect()` factory. [`register_builtin`] wires all of them
//! into a [`core::Registry`] in a fixed, visible order.
//!
//! # Engines
//!
//! | Family | Modules |
//! |--------|---------|
//! | Cellular automaton | [`life`] |
//! | Game AI | [`snake`], [`tetris`] |
//! | Particles / physics | [`particle`], [`fireworks`], [`particle_burst`], [`snowfall`] |
//! | Wave / field | [`fire`], [`ripple`], [`plasma`], [`rainbow_wave`], [`ocean_wave`] |
//! | Streams | [`matrix_rain`], [`digital_waterfall`], [`typewriter`] |
//! | Procedural | [`maze`], [`matrix_tunnel`], [`dna_helix`], [`heartbeat`], [`big_clock`], [`wave_text`], [`audio_visualizer`], [`starry_sky`], [`qrcode`](crate::qrcode) |
//!
//! Randomness is always an explicit `StdRng` owned by the simulation, so tests
//! construct engines from a fixed seed.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use symbol_move_core as core;
pub use symbol_move_types as types;

use crate::core::{Effect, Registry, RegistryError};

pub mod audio_visualizer;
pub mod big_clock;
pub mod digital_waterfall;
pub mod dna_helix;
pub mod fire;
pub mod fireworks;
pub mod heartbeat;
pub mod life;
pub mod matrix_rain;
pub mod matrix_tunnel;
pub mod maze;
pub mod ocean_wave;
pub mod particle;
pub mod particle_burst;
pub mod plasma;
pub mod qrcode;
pub mod rainbow_wave;
pub mod ripple;
pub mod snake;
pub mod snowfall;
pub mod starry_sky;
pub mod tetris;
pub mod typewriter;
pub mod wave_text;

/// Fresh entropy-seeded generator for a new effect instance.
pub fn os_rng() -> StdRng {
    StdRng::from_os_rng()
}

/// Probability of an event tuned as `per_frame` at the nominal frame rate,
/// for a tick covering `frames` nominal frames.
pub(crate) fn scaled_chance(per_frame: f64, frames: f64) -> f64 {
    (per_frame * frames).clamp(0.0, 1.0)
}

/// Factories of every built-in effect, in menu order.
pub const BUILTIN: &[fn() -> Box<dyn Effect>] = &[
    audio_visualizer::effect,
    big_clock::effect,
    digital_waterfall::effect,
    dna_helix::effect,
    fire::effect,
    fireworks::effect,
    life::effect,
    heartbeat::effect,
    matrix_rain::effect,
    matrix_tunnel::effect,
    maze::effect,
    ocean_wave::effect,
    particle_burst::effect,
    plasma::effect,
    qrcode::effect,
    rainbow_wave::effect,
    snake::effect,
    snowfall::effect,
    starry_sky::effect,
    tetris::effect,
    typewriter::effect,
    ripple::effect,
    wave_text::effect,
];

/// Register every built-in effect.
///
/// Fails on the first duplicate or empty id; callers treat that as fatal.
pub fn register_builtin(registry: &Registry) -> Result<(), RegistryError> {
    for factory in BUILTIN {
        registry.register(*factory)?;
    }
    debug!("registered {} built-in effects", BUILTIN.len());
    Ok(())
}

/// A new registry holding the built-in effects.
pub fn builtin_registry() -> Result<Registry, RegistryError> {
    let registry = Registry::new();
    register_builtin(&registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FrameBuffer, Surface};

    #[test]
    fn builtin_ids_are_unique_and_complete() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.count(), BUILTIN.len());
        for id in [
            "game-of-life",
            "snake-ai",
            "tetris-auto",
            "fire-effect",
            "water-ripple",
            "fireworks",
            "particle-burst",
            "matrix-rain",
            "qrcode-gen",
        ] {
            assert!(registry.has(id), "missing {id}");
        }
    }

    #[test]
    fn chance_scales_with_frames_and_saturates() {
        assert_eq!(scaled_chance(0.1, 0.0), 0.0);
        assert!((scaled_chance(0.1, 2.0) - 0.2).abs() < 1e-12);
        assert_eq!(scaled_chance(0.3, 10.0), 1.0);
    }

    #[test]
    fn registering_twice_fails_fast() {
        let registry = builtin_registry().unwrap();
        assert!(matches!(
            register_builtin(&registry),
            Err(RegistryError::DuplicateId(_))
        ));
    }

    #[test]
    fn every_effect_runs_a_few_ticks_on_a_normal_terminal() {
        let registry = builtin_registry().unwrap();
        for meta in registry.list() {
            let mut effect = registry.create(&meta.id).unwrap();
            let mut fb = FrameBuffer::new(80, 24);
            effect
                .init(&fb)
                .unwrap_or_else(|e| panic!("{} failed to init: {e}", meta.id));
            for _ in 0..5 {
                effect.update(1.0 / 30.0);
                fb.clear();
                effect.render(&mut fb);
            }
            effect.resize(40, 12);
            fb.resize(40, 12);
            effect.update(1.0 / 30.0);
            fb.clear();
            effect.render(&mut fb);
            effect.cleanup().unwrap();
            effect.cleanup().unwrap();
        }
    }

    #[test]
    fn metadata_is_readable_before_init() {
        for factory in BUILTIN {
            let meta = factory().metadata();
            assert!(!meta.id.is_empty());
            assert!(!meta.name.is_empty());
            assert!(!meta.name_en.is_empty());
            assert!(!meta.description.is_empty());
        }
    }
}
