//! Menu loop: select → launch → back to the menu.
//!
//! Generic over the event source so the whole flow runs headless in tests.
//! The same source is cloned into the input watcher while an effect runs,
//! mirroring how both read the one terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::core::{CancelToken, LifecycleDriver, LifecycleError, Registry, RunContext, Surface};
use crate::i18n::LanguageManager;
use crate::input::{is_escape, EventSource, InputEvent, InputWatcher, Key};
use crate::term::{render_error, MenuAction, Selector};

/// Poll timeout while the menu or the error overlay waits for a key.
pub const MENU_POLL: Duration = Duration::from_millis(250);

pub struct App<'a, E> {
    driver: LifecycleDriver,
    lang: &'a LanguageManager,
    events: E,
}

impl<'a, E> App<'a, E>
where
    E: EventSource + Clone + Send + 'static,
{
    pub fn new(registry: Arc<Registry>, lang: &'a LanguageManager, events: E) -> Self {
        Self {
            driver: LifecycleDriver::new(registry),
            lang,
            events,
        }
    }

    pub fn driver(&self) -> &LifecycleDriver {
        &self.driver
    }

    /// Run the menu until the user quits.
    pub fn run_menu(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let mut selector = Selector::new(self.driver.registry().list());
        self.driver.begin_selection();
        let mut dirty = true;

        loop {
            if dirty {
                selector.render(surface, self.lang.current());
                surface.show()?;
                dirty = false;
            }

            let Some(event) = self.events.poll_event(MENU_POLL)? else {
                continue;
            };
            dirty = true;

            match event {
                InputEvent::Resize(w, h) => {
                    surface.resize(w, h);
                    surface.sync()?;
                }
                InputEvent::Key(key) => match selector.handle_key(key) {
                    MenuAction::None => {}
                    MenuAction::Quit => {
                        info!("quit from menu");
                        return Ok(());
                    }
                    MenuAction::ToggleLanguage => {
                        if let Err(err) = self.lang.toggle_and_save() {
                            warn!("language preference not saved: {err}");
                        }
                    }
                    MenuAction::Launch(id) => {
                        if let Err(err) = self.launch(surface, &id, is_escape)? {
                            self.show_error(surface, &err.to_string())?;
                        }
                        surface.sync()?;
                        selector.refresh(self.driver.registry().list());
                    }
                },
            }
        }
    }

    /// Run one effect until a key matching `is_cancel` arrives.
    pub fn run_single(&mut self, surface: &mut dyn Surface, id: &str, is_cancel: fn(Key) -> bool) -> Result<()> {
        self.launch(surface, id, is_cancel)?
            .with_context(|| format!("running effect {id}"))
    }

    fn launch(
        &mut self,
        surface: &mut dyn Surface,
        id: &str,
        is_cancel: fn(Key) -> bool,
    ) -> Result<Result<(), LifecycleError>> {
        let cancel = CancelToken::new();
        let watcher = InputWatcher::spawn_with(self.events.clone(), cancel.clone(), is_cancel)
            .context("starting the input thread")?;
        let ctx = RunContext::with_resizes(cancel, watcher.resizes());

        let outcome = self.driver.launch(id, surface, &ctx);
        watcher.finish();
        Ok(outcome)
    }

    /// Show `message` until any key is pressed.
    fn show_error(&mut self, surface: &mut dyn Surface, message: &str) -> Result<()> {
        loop {
            render_error(surface, self.lang.current(), message);
            surface.show()?;
            match self.events.poll_event(MENU_POLL)? {
                Some(InputEvent::Key(_)) => return Ok(()),
                Some(InputEvent::Resize(w, h)) => {
                    surface.resize(w, h);
                    surface.sync()?;
                }
                None => {}
            }
        }
    }
}
