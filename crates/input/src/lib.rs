//! Terminal input.
//!
//! Maps `crossterm` events into the small [`Key`] vocabulary the menu and
//! effects understand, and runs the [`InputWatcher`] thread that turns the
//! cancel key into a fired [`CancelToken`](core::CancelToken) while an
//! effect is on screen.

pub mod map;
pub mod watcher;

pub use symbol_move_core as core;

pub use map::{is_escape, is_exit, map_event, map_key, InputEvent, Key};
pub use watcher::{EventSource, InputWatcher, TerminalEvents, POLL_INTERVAL};
