//! The menu loop driven by scripted input on a headless surface.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use symbol_move::app::App;
use symbol_move::core::{
    EffectError, EffectMetadata, FrameBuffer, LifecycleState, Registry, Simulation, SimulationEffect,
    Surface,
};
use symbol_move::i18n::LanguageManager;
use symbol_move::input::{EventSource, InputEvent, Key};
use symbol_move::types::Language;

/// Separate queues for the menu (test thread) and the input watcher thread,
/// so the script does not depend on which thread polls first.
#[derive(Clone, Default)]
struct Script {
    menu: Arc<Mutex<VecDeque<InputEvent>>>,
    watcher: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl Script {
    fn new(menu: &[InputEvent], watcher: &[InputEvent]) -> Self {
        Self {
            menu: Arc::new(Mutex::new(menu.iter().copied().collect())),
            watcher: Arc::new(Mutex::new(watcher.iter().copied().collect())),
        }
    }
}

impl EventSource for Script {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        let on_watcher = thread::current().name() == Some("symbolmove-input");
        let queue = if on_watcher { &self.watcher } else { &self.menu };
        let next = queue.lock().unwrap().pop_front();
        if next.is_none() {
            thread::sleep(timeout.min(Duration::from_millis(10)));
        }
        Ok(next)
    }
}

struct Ticker(u32);

impl Simulation for Ticker {
    fn update(&mut self, _dt: f64) {
        self.0 += 1;
    }
    fn render(&self, surface: &mut dyn Surface) {
        surface.put_str(0, 0, "tick", Default::default());
    }
}

fn registry() -> Arc<Registry> {
    let registry = Registry::new();
    registry
        .register(|| {
            Box::new(SimulationEffect::new(
                EffectMetadata::new("ticker", "计时", "Ticker"),
                60,
                |_w, _h| Ok(Ticker(0)),
            ))
        })
        .unwrap();
    registry
        .register(|| {
            Box::new(SimulationEffect::new(
                EffectMetadata::new("broken", "故障", "Broken"),
                60,
                |_w, _h| Err::<Ticker, _>(EffectError::Init("nope".into())),
            ))
        })
        .unwrap();
    Arc::new(registry)
}

#[test]
fn launch_escape_then_quit() {
    let script = Script::new(
        &[InputEvent::Key(Key::Enter), InputEvent::Key(Key::Quit)],
        &[InputEvent::Key(Key::Quit), InputEvent::Key(Key::Esc)],
    );
    let lang = LanguageManager::new();
    let mut app = App::new(registry(), &lang, script.clone());
    let mut fb = FrameBuffer::new(80, 30);

    app.run_menu(&mut fb).unwrap();

    let trace = app.driver().trace();
    assert!(trace.contains(&LifecycleState::Running));
    assert_eq!(app.driver().state(), LifecycleState::Selecting);
    assert!(script.watcher.lock().unwrap().is_empty());
    // the menu is back on screen
    assert!(fb.text().contains("计时"));
}

#[test]
fn failed_launch_shows_the_overlay_until_a_key() {
    let script = Script::new(
        &[
            InputEvent::Key(Key::Digit(2)),
            InputEvent::Key(Key::Other),
            InputEvent::Key(Key::Quit),
        ],
        &[],
    );
    let lang = LanguageManager::new();
    let mut app = App::new(registry(), &lang, script);
    let mut fb = FrameBuffer::new(80, 30);

    app.run_menu(&mut fb).unwrap();

    assert!(app.driver().trace().contains(&LifecycleState::Error));
    assert!(!fb.text().contains("错误"));
    assert!(fb.text().contains("► 2. 故障"));
}

#[test]
fn language_toggle_and_resize_redraw_the_menu() {
    let script = Script::new(
        &[
            InputEvent::Key(Key::ToggleLanguage),
            InputEvent::Resize(60, 24),
            InputEvent::Key(Key::Quit),
        ],
        &[],
    );
    let lang = LanguageManager::new();
    let mut app = App::new(registry(), &lang, script);
    let mut fb = FrameBuffer::new(80, 30);

    app.run_menu(&mut fb).unwrap();

    assert_eq!(lang.current(), Language::English);
    assert_eq!(fb.size(), (60, 24));
    assert!(fb.text().contains("Ticker"));
    assert!(fb.frames_shown() >= 3);
}

#[test]
fn single_run_reports_init_errors() {
    let lang = LanguageManager::new();
    let mut app = App::new(registry(), &lang, Script::default());
    let mut fb = FrameBuffer::new(20, 10);

    let err = app.run_single(&mut fb, "broken", symbol_move::input::is_exit).unwrap_err();
    assert!(format!("{err:#}").contains("nope"));
}
