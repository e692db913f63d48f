//! Select → init → run → cleanup through the facade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use symbol_move::core::{
    CancelToken, Effect, EffectError, EffectMetadata, FrameBuffer, LifecycleDriver, LifecycleError,
    LifecycleState, Registry, RegistryError, RunContext, Surface,
};
use symbol_move::engine::builtin_registry;

use LifecycleState::*;

/// Hand-written effect that counts its cleanups.
struct Probe {
    fail_init: bool,
    cleanups: Arc<AtomicUsize>,
    frames: u32,
}

impl Effect for Probe {
    fn metadata(&self) -> EffectMetadata {
        let id = if self.fail_init { "broken" } else { "probe" };
        EffectMetadata::new(id, id, id)
    }

    fn fps(&self) -> u32 {
        60
    }

    fn init(&mut self, _surface: &dyn Surface) -> Result<(), EffectError> {
        if self.fail_init {
            return Err(EffectError::Init("no luck".into()));
        }
        Ok(())
    }

    fn update(&mut self, _dt: f64) {
        self.frames += 1;
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.put_str(0, 0, &self.frames.to_string(), Default::default());
    }

    fn cleanup(&mut self) -> Result<(), EffectError> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn registry(cleanups: &Arc<AtomicUsize>) -> Arc<Registry> {
    let registry = Registry::new();
    for fail_init in [false, true] {
        let cleanups = Arc::clone(cleanups);
        registry
            .register(move || {
                Box::new(Probe {
                    fail_init,
                    cleanups: Arc::clone(&cleanups),
                    frames: 0,
                })
            })
            .unwrap();
    }
    Arc::new(registry)
}

#[test]
fn init_failure_routes_through_error_back_to_selecting() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let mut driver = LifecycleDriver::new(registry(&cleanups));
    let before = cleanups.load(Ordering::SeqCst);

    let mut fb = FrameBuffer::new(10, 10);
    let err = driver
        .launch("broken", &mut fb, &RunContext::new(CancelToken::new()))
        .unwrap_err();

    assert!(matches!(err, LifecycleError::Init { ref id, .. } if id == "broken"));
    assert_eq!(driver.trace(), &[Selecting, Initializing, Error, Selecting]);
    assert_eq!(driver.state(), Selecting);
    assert_eq!(cleanups.load(Ordering::SeqCst) - before, 1);
    assert_eq!(fb.frames_shown(), 0);
}

#[test]
fn unknown_id_is_reported_and_recovered() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let mut driver = LifecycleDriver::new(registry(&cleanups));
    let mut fb = FrameBuffer::new(10, 10);
    let err = driver
        .launch("missing", &mut fb, &RunContext::new(CancelToken::new()))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Registry(RegistryError::NotFound(_))));
    assert_eq!(driver.state(), Selecting);
}

#[test]
fn cancel_from_another_thread_stops_the_run_promptly() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let mut driver = LifecycleDriver::new(registry(&cleanups));
    let before = cleanups.load(Ordering::SeqCst);

    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        remote.cancel();
        Instant::now()
    });

    let mut fb = FrameBuffer::new(10, 2);
    driver.launch("probe", &mut fb, &RunContext::new(cancel)).unwrap();
    let returned = Instant::now();
    let fired = canceller.join().unwrap();

    // one 60 fps frame plus scheduling slack
    assert!(returned.duration_since(fired) < Duration::from_millis(100));
    assert!(fb.frames_shown() >= 1);
    assert_eq!(driver.trace(), &[Selecting, Initializing, Running, CleaningUp, Selecting]);
    assert_eq!(cleanups.load(Ordering::SeqCst) - before, 1);
}

#[test]
fn builtin_effect_runs_and_returns_to_selection() {
    let mut driver = LifecycleDriver::new(Arc::new(builtin_registry().unwrap()));
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(120));
        remote.cancel();
    });

    let mut fb = FrameBuffer::new(40, 20);
    driver.launch("plasma", &mut fb, &RunContext::new(cancel)).unwrap();
    canceller.join().unwrap();

    assert!(fb.frames_shown() >= 1);
    assert!(fb.non_blank_count() > 0);
    assert_eq!(driver.state(), Selecting);
}

#[test]
fn too_small_surface_fails_init() {
    let mut driver = LifecycleDriver::new(Arc::new(builtin_registry().unwrap()));
    let mut fb = FrameBuffer::new(8, 5);
    let err = driver
        .launch("tetris-auto", &mut fb, &RunContext::new(CancelToken::new()))
        .unwrap_err();
    assert!(err.to_string().contains("tetris-auto"));
    assert!(driver.trace().contains(&Error));
}
