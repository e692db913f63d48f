//! Terminal presentation.
//!
//! - [`TerminalSurface`]: the crossterm-backed [`Surface`](core::Surface)
//!   effects draw into, flushed as one full frame per `show`
//! - [`Selector`]: the effect menu (state, key handling, drawing)
//! - [`render_error`]: the overlay shown when a launch fails
//!
//! Menu and overlay only draw through `dyn Surface`, so they are tested
//! against the headless framebuffer.

pub mod overlay;
pub mod selector;
pub mod surface;

pub use symbol_move_core as core;
pub use symbol_move_i18n as i18n;
pub use symbol_move_input as input;

pub use overlay::render_error;
pub use selector::{MenuAction, Selector};
pub use surface::{encode_frame_into, TerminalSurface};
