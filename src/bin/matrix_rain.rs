//! Standalone matrix rain with tunable speed, density and character set.
//!
//! Esc, q or Ctrl+C exits.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use symbol_move::app::App;
use symbol_move::core::Registry;
use symbol_move::engine::matrix_rain;
use symbol_move::i18n::LanguageManager;
use symbol_move::input::{is_exit, TerminalEvents};
use symbol_move::logging;
use symbol_move::term::TerminalSurface;
use symbol_move::types::{clamp_fps, CharSet, Density, Speed};

#[derive(Debug, Parser)]
#[command(
    name = "matrix-rain",
    version,
    about = "符动世界 - 矩阵字符雨效果",
    after_help = "Examples:\n  matrix-rain\n  matrix-rain --speed fast --density dense\n  matrix-rain --charset katakana --speed slow"
)]
struct Cli {
    /// Fall speed: slow, medium, fast
    #[arg(long, default_value = "medium")]
    speed: Speed,

    /// Stream density: sparse, medium, dense
    #[arg(long, default_value = "medium")]
    density: Density,

    /// Character set: digits, letters, katakana, mixed
    #[arg(long, default_value = "mixed")]
    charset: CharSet,

    /// Frames per second (positive)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
}

impl Cli {
    fn config(&self) -> matrix_rain::Config {
        matrix_rain::Config {
            speed: self.speed,
            density: self.density,
            charset: self.charset,
            fps: clamp_fps(self.fps),
            ..matrix_rain::Config::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let config = cli.config();
    let registry = Registry::new();
    registry
        .register(move || Box::new(matrix_rain::effect_with(config)))
        .context("registering matrix rain")?;
    let id = matrix_rain::metadata().id;

    let mut term = TerminalSurface::new().context("acquiring the terminal")?;
    term.enter().context("entering raw mode")?;

    let lang = LanguageManager::new();
    let mut app = App::new(Arc::new(registry), &lang, TerminalEvents);
    let result = app.run_single(&mut term, &id, is_exit);

    let _ = term.exit();
    result
}
