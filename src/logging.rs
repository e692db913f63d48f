//! File logging for the binaries.
//!
//! The terminal belongs to the surface while an effect runs, so log records go
//! to a file: `$SYMBOLMOVE_LOG_FILE`, or `symbolmove.log` in the temp dir.
//! `RUST_LOG` filters as usual and defaults to `warn`.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

pub const LOG_FILE_ENV: &str = "SYMBOLMOVE_LOG_FILE";

pub fn log_file_path() -> PathBuf {
    env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("symbolmove.log"))
}

/// Install the global logger. Returns the file being written.
pub fn init() -> Result<PathBuf> {
    let path = log_file_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing the logger")?;
    Ok(path)
}
