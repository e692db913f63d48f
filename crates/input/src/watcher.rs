//! Input-watching thread that runs next to an effect's frame loop.
//!
//! The thread polls with a short timeout so it notices a token fired from
//! elsewhere. A cancel key fires the token once; resizes are forwarded over
//! a channel that the frame loop drains each tick.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event;
use log::{debug, warn};

use crate::core::CancelToken;
use crate::map::{map_event, InputEvent, Key};

/// How long one poll may block before the token is checked again.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where input events come from.
pub trait EventSource {
    /// Wait up to `timeout` for the next relevant event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// The process terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if event::poll(timeout)? {
            Ok(map_event(event::read()?))
        } else {
            Ok(None)
        }
    }
}

pub struct InputWatcher {
    cancel: CancelToken,
    resizes: Receiver<(u16, u16)>,
    handle: Option<JoinHandle<()>>,
}

impl InputWatcher {
    /// Watch the terminal; keys matching `is_cancel` fire `cancel`.
    pub fn spawn(cancel: CancelToken, is_cancel: fn(Key) -> bool) -> io::Result<Self> {
        Self::spawn_with(TerminalEvents, cancel, is_cancel)
    }

    pub fn spawn_with<S>(source: S, cancel: CancelToken, is_cancel: fn(Key) -> bool) -> io::Result<Self>
    where
        S: EventSource + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("symbolmove-input".into())
            .spawn(move || watch(source, token, is_cancel, tx))?;
        Ok(Self {
            cancel,
            resizes: rx,
            handle: Some(handle),
        })
    }

    /// New `(width, height)` values, in arrival order.
    pub fn resizes(&self) -> Receiver<(u16, u16)> {
        self.resizes.clone()
    }

    /// Fire the token if nobody has yet and wait for the thread.
    pub fn finish(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch<S: EventSource>(
    mut source: S,
    cancel: CancelToken,
    is_cancel: fn(Key) -> bool,
    resizes: Sender<(u16, u16)>,
) {
    while !cancel.is_cancelled() {
        match source.poll_event(POLL_INTERVAL) {
            Ok(Some(InputEvent::Key(key))) if is_cancel(key) => {
                debug!("cancel key {key:?}");
                cancel.cancel();
            }
            Ok(Some(InputEvent::Resize(w, h))) => {
                // receiver gone means the effect already finished
                let _ = resizes.send((w, h));
            }
            Ok(_) => {}
            Err(err) => {
                warn!("input polling failed: {err}");
                cancel.cancel();
            }
        }
    }
    debug!("input watcher exiting");
}
