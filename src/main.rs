//! SymbolMove menu runner (default binary).
//!
//! Without arguments it shows the effect menu; `--effect ID` runs one effect
//! directly (Esc or q to leave) and `--list` prints the registered ids.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use symbol_move::app::App;
use symbol_move::engine::builtin_registry;
use symbol_move::i18n::LanguageManager;
use symbol_move::input::{is_exit, TerminalEvents};
use symbol_move::logging;
use symbol_move::term::TerminalSurface;

#[derive(Debug, Parser)]
#[command(name = "symbol-move", version, about = "符动世界(SymbolMove) terminal effects")]
struct Cli {
    /// Run a single effect instead of the menu.
    #[arg(long, value_name = "ID")]
    effect: Option<String>,

    /// Print the available effect ids and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let registry = Arc::new(builtin_registry().context("registering built-in effects")?);
    let lang = LanguageManager::load_default();

    if cli.list {
        for meta in registry.list() {
            println!("{:<20} {}", meta.id, meta.display_name(lang.current()));
        }
        return Ok(());
    }
    if let Some(id) = &cli.effect {
        if !registry.has(id) {
            bail!("unknown effect '{id}' (see --list)");
        }
    }

    let mut term = TerminalSurface::new().context("acquiring the terminal")?;
    term.enter().context("entering raw mode")?;

    let mut app = App::new(registry, &lang, TerminalEvents);
    let result = match cli.effect.as_deref() {
        Some(id) => app.run_single(&mut term, id, is_exit),
        None => app.run_menu(&mut term),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}
