//! Select → init → run → cleanup state machine.
//!
//! The driver is single-threaded: one `launch` call walks the whole path for
//! one effect and always ends back in [`LifecycleState::Selecting`]. The
//! transitions of the latest launch are kept for inspection.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::effect::RunContext;
use crate::error::LifecycleError;
use crate::registry::Registry;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Idle,
    Selecting,
    Initializing,
    Running,
    CleaningUp,
    Error,
}

pub struct LifecycleDriver {
    registry: Arc<Registry>,
    state: LifecycleState,
    trace: Vec<LifecycleState>,
}

impl LifecycleDriver {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            state: LifecycleState::Idle,
            trace: vec![LifecycleState::Idle],
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// States visited by the most recent launch, starting at `Selecting`.
    pub fn trace(&self) -> &[LifecycleState] {
        &self.trace
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Enter the menu.
    pub fn begin_selection(&mut self) {
        if self.state != LifecycleState::Selecting {
            self.transition(LifecycleState::Selecting);
        }
    }

    /// Run the effect `id` to completion on `surface`.
    ///
    /// Init failures and unknown ids pass through `Error` and come back to
    /// `Selecting` with the error returned; run errors come back the same way
    /// after cleanup.
    pub fn launch(
        &mut self,
        id: &str,
        surface: &mut dyn Surface,
        ctx: &RunContext,
    ) -> Result<(), LifecycleError> {
        self.begin_selection();
        self.trace.clear();
        self.trace.push(LifecycleState::Selecting);

        self.transition(LifecycleState::Initializing);
        let mut effect = match self.registry.create(id) {
            Ok(effect) => effect,
            Err(err) => {
                warn!("cannot launch {id}: {err}");
                self.recover();
                return Err(err.into());
            }
        };

        if let Err(source) = effect.init(surface) {
            warn!("effect {id} failed to initialize: {source}");
            if let Err(err) = effect.cleanup() {
                warn!("cleanup of {id} after failed init: {err}");
            }
            self.recover();
            return Err(LifecycleError::Init {
                id: id.to_string(),
                source,
            });
        }

        self.transition(LifecycleState::Running);
        info!("running effect {id} at {} fps", effect.fps());
        let outcome = effect.run(surface, ctx);

        self.transition(LifecycleState::CleaningUp);
        if let Err(err) = effect.cleanup() {
            warn!("cleanup of {id} failed: {err}");
        }
        drop(effect);
        self.transition(LifecycleState::Selecting);

        outcome.map_err(|source| {
            warn!("effect {id} stopped with an error: {source}");
            LifecycleError::Runtime {
                id: id.to_string(),
                source,
            }
        })
    }

    fn recover(&mut self) {
        self.transition(LifecycleState::Error);
        self.transition(LifecycleState::Selecting);
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!("lifecycle {:?} -> {:?}", self.state, next);
        self.state = next;
        self.trace.push(next);
    }
}
