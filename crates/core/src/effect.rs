//! The effect contract and the fixed-rate frame loop.
//!
//! Most engines are plain state machines: they implement [`Simulation`] and are
//! wrapped by [`SimulationEffect`], which supplies init/cleanup bookkeeping and
//! the shared loop in [`run_frames`].

use std::time::{Duration, Instant};

use crossbeam_channel::{never, select, tick, Receiver};

use crate::cancel::CancelToken;
use crate::error::EffectError;
use crate::surface::Surface;
use crate::types::{clamp_fps, EffectMetadata, DEFAULT_FPS};

/// What an active effect needs from the outside world while it runs.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub cancel: CancelToken,
    /// New `(width, height)` values published by the input thread.
    pub resizes: Receiver<(u16, u16)>,
}

impl RunContext {
    /// Context with no resize source.
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            cancel,
            resizes: never(),
        }
    }

    pub fn with_resizes(cancel: CancelToken, resizes: Receiver<(u16, u16)>) -> Self {
        Self { cancel, resizes }
    }
}

/// A selectable, runnable visual effect.
///
/// Call order is `init` → `run` → `cleanup`. `cleanup` must be safe to call
/// more than once and after a failed `init`.
pub trait Effect: Send {
    fn metadata(&self) -> EffectMetadata;

    /// Target frames per second for the default loop.
    fn fps(&self) -> u32 {
        DEFAULT_FPS
    }

    /// Capture the surface size and build initial state.
    fn init(&mut self, surface: &dyn Surface) -> Result<(), EffectError>;

    /// Advance state by `dt` seconds.
    fn update(&mut self, dt: f64);

    /// Draw the current state. The surface has already been cleared.
    fn render(&self, surface: &mut dyn Surface);

    fn resize(&mut self, _width: u16, _height: u16) {}

    /// Single-threaded loop; returns when `ctx.cancel` fires.
    fn run(&mut self, surface: &mut dyn Surface, ctx: &RunContext) -> Result<(), EffectError> {
        run_frames(self, surface, ctx)
    }

    fn cleanup(&mut self) -> Result<(), EffectError>;
}

/// State machine driven by [`SimulationEffect`].
pub trait Simulation: Send + 'static {
    fn update(&mut self, dt: f64);

    /// Must not mutate state; calling it twice yields identical cells.
    fn render(&self, surface: &mut dyn Surface);

    fn resize(&mut self, _width: u16, _height: u16) {}
}

type Builder<S> = Box<dyn FnMut(u16, u16) -> Result<S, EffectError> + Send>;

/// Adapts a [`Simulation`] to the [`Effect`] contract.
///
/// The builder runs in `init` with the surface size; `cleanup` drops the state.
pub struct SimulationEffect<S> {
    metadata: EffectMetadata,
    fps: u32,
    build: Builder<S>,
    state: Option<S>,
}

impl<S: Simulation> SimulationEffect<S> {
    pub fn new<F>(metadata: EffectMetadata, fps: u32, build: F) -> Self
    where
        F: FnMut(u16, u16) -> Result<S, EffectError> + Send + 'static,
    {
        Self {
            metadata,
            fps: clamp_fps(fps),
            build: Box::new(build),
            state: None,
        }
    }

    /// The live simulation, if `init` succeeded and `cleanup` has not run.
    pub fn simulation(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut S> {
        self.state.as_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}

impl<S: Simulation> Effect for SimulationEffect<S> {
    fn metadata(&self) -> EffectMetadata {
        self.metadata.clone()
    }

    fn fps(&self) -> u32 {
        self.fps
    }

    fn init(&mut self, surface: &dyn Surface) -> Result<(), EffectError> {
        if self.state.is_some() {
            return Err(EffectError::Init(format!(
                "{} is already initialized",
                self.metadata.id
            )));
        }
        let (w, h) = surface.size();
        self.state = Some((self.build)(w, h)?);
        Ok(())
    }

    fn update(&mut self, dt: f64) {
        if let Some(state) = self.state.as_mut() {
            state.update(dt);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if let Some(state) = self.state.as_ref() {
            state.render(surface);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        if let Some(state) = self.state.as_mut() {
            state.resize(width, height);
        }
    }

    fn cleanup(&mut self) -> Result<(), EffectError> {
        self.state = None;
        Ok(())
    }
}

/// Tick period for a target frame rate.
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / clamp_fps(fps) as f64)
}

/// The shared frame loop.
///
/// Each tick: apply pending resizes, update with the measured elapsed time,
/// clear, render, show. Returns `Ok` as soon as the cancel signal fires.
pub fn run_frames<E>(
    effect: &mut E,
    surface: &mut dyn Surface,
    ctx: &RunContext,
) -> Result<(), EffectError>
where
    E: Effect + ?Sized,
{
    let ticker = tick(frame_period(effect.fps()));
    let mut last = Instant::now();

    loop {
        select! {
            recv(ctx.cancel.receiver()) -> _ => return Ok(()),
            recv(ticker) -> at => {
                // select! picks fairly among ready arms.
                if ctx.cancel.is_cancelled() {
                    return Ok(());
                }
                let now = at.unwrap_or_else(|_| Instant::now());

                for (w, h) in ctx.resizes.try_iter() {
                    surface.resize(w, h);
                    surface.sync()?;
                    effect.resize(w, h);
                }

                let dt = now.saturating_duration_since(last).as_secs_f64();
                last = now;

                effect.update(dt);
                surface.clear();
                effect.render(surface);
                surface.show()?;
            }
        }
    }
}
