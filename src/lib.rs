//! SymbolMove (workspace facade crate).
//!
//! Re-exports the member crates as `symbol_move::{core, engine, i18n, input,
//! term, types}` and holds the small amount of process plumbing the two
//! binaries share.

pub use symbol_move_core as core;
pub use symbol_move_engine as engine;
pub use symbol_move_i18n as i18n;
pub use symbol_move_input as input;
pub use symbol_move_term as term;
pub use symbol_move_types as types;

pub mod app;
pub mod logging;
