//! Shared types module - plain data used across the workspace
//!
//! This crate defines the data structures every other crate agrees on: cell
//! colors and styles, effect metadata, the UI language, and the option enums
//! exposed on the command line. Nothing here performs I/O, so the types can be
//! used from the simulation engines, the terminal layer and the binaries alike.
//!
//! # Frame Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 30 | Frame rate used by most effects |
//! | `MIN_FPS` | 1 | Lowest accepted frame rate |
//! | `MAX_FPS` | 240 | Highest accepted frame rate |
//!
//! # Examples
//!
//! ```
//! use symbol_move_types::{CharSet, Density, Language, Speed};
//!
//! // Options parse case-insensitively
//! let speed: Speed = "FAST".parse().unwrap();
//! assert_eq!(speed, Speed::Fast);
//! assert_eq!("sparse".parse::<Density>().unwrap(), Density::Sparse);
//! assert_eq!("katakana".parse::<CharSet>().unwrap(), CharSet::Katakana);
//!
//! // Language codes round-trip through the preference file format
//! assert_eq!(Language::from_code("en"), Some(Language::English));
//! assert_eq!(Language::English.code(), "en");
//! ```

pub mod metadata;
pub mod options;
pub mod style;

pub use metadata::{EffectMetadata, Language};
pub use options::{CharSet, Density, ParseOptionError, Speed};
pub use style::{palette, CellStyle, Rgb};

/// Frame rate used by effects that don't choose their own.
pub const DEFAULT_FPS: u32 = 30;

/// Lowest accepted frame rate.
pub const MIN_FPS: u32 = 1;

/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 240;

/// Clamp a requested frame rate into `[MIN_FPS, MAX_FPS]`.
pub fn clamp_fps(fps: u32) -> u32 {
    fps.clamp(MIN_FPS, MAX_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_clamped_into_range() {
        assert_eq!(clamp_fps(0), MIN_FPS);
        assert_eq!(clamp_fps(DEFAULT_FPS), DEFAULT_FPS);
        assert_eq!(clamp_fps(10_000), MAX_FPS);
    }
}
