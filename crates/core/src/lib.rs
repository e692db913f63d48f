//! Core effect framework - contract, registry and lifecycle
//!
//! This crate contains everything that turns a set of independent simulations
//! into a selectable showcase. It has **no dependency** on a real terminal:
//! effects draw into the [`Surface`] capability, and the headless
//! [`FrameBuffer`] implements that capability for tests and benchmarks.
//!
//! # Module Structure
//!
//! - [`surface`]: the grid surface capability and the in-memory framebuffer
//! - [`effect`]: the [`Effect`] contract, the [`Simulation`] trait engines
//!   implement, and the fixed-rate frame loop
//! - [`cancel`]: the one-shot cancellation signal shared with the input thread
//! - [`registry`]: id → factory mapping with registration-order enumeration
//! - [`lifecycle`]: the select → init → run → cleanup state machine
//! - [`error`]: error types for all of the above
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──▶ Selecting ──▶ Initializing ──▶ Running ──▶ CleaningUp ──▶ Selecting
//!                              │
//!                              └──▶ Error ──▶ Selecting
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use symbol_move_core::{
//!     CancelToken, EffectMetadata, FrameBuffer, LifecycleDriver, Registry, RunContext,
//!     Simulation, SimulationEffect, Surface,
//! };
//!
//! struct Blank;
//!
//! impl Simulation for Blank {
//!     fn update(&mut self, _dt: f64) {}
//!     fn render(&self, _surface: &mut dyn Surface) {}
//! }
//!
//! let registry = Registry::new();
//! registry
//!     .register(|| {
//!         Box::new(SimulationEffect::new(
//!             EffectMetadata::new("blank", "空白", "Blank"),
//!             30,
//!             |_w, _h| Ok(Blank),
//!         ))
//!     })
//!     .unwrap();
//!
//! let mut driver = LifecycleDriver::new(Arc::new(registry));
//! driver.begin_selection();
//!
//! // A token cancelled up front makes the run return immediately.
//! let cancel = CancelToken::new();
//! cancel.cancel();
//! let mut fb = FrameBuffer::new(10, 10);
//! driver.launch("blank", &mut fb, &RunContext::new(cancel)).unwrap();
//! ```

pub mod cancel;
pub mod effect;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod surface;

pub use symbol_move_types as types;
pub use symbol_move_types::{CellStyle, EffectMetadata, Rgb};

pub use cancel::CancelToken;
pub use effect::{frame_period, run_frames, Effect, RunContext, Simulation, SimulationEffect};
pub use error::{EffectError, LifecycleError, RegistryError, SurfaceError};
pub use lifecycle::{LifecycleDriver, LifecycleState};
pub use registry::{EffectFactory, Registry};
pub use surface::{Cell, FrameBuffer, Surface};
