//! User-facing option enums (speed, density, character set).
//!
//! All of them parse case-insensitively, so they work directly as clap values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when an option string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Animation speed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Medium => "medium",
            Speed::Fast => "fast",
        }
    }
}

impl FromStr for Speed {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "medium" => Ok(Speed::Medium),
            "fast" => Ok(Speed::Fast),
            _ => Err(ParseOptionError {
                kind: "speed",
                value: s.to_string(),
                expected: "slow, medium, fast",
            }),
        }
    }
}

/// Spawn density step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Density {
    Sparse,
    #[default]
    Medium,
    Dense,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Medium => "medium",
            Density::Dense => "dense",
        }
    }
}

impl FromStr for Density {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sparse" => Ok(Density::Sparse),
            "medium" => Ok(Density::Medium),
            "dense" => Ok(Density::Dense),
            _ => Err(ParseOptionError {
                kind: "density",
                value: s.to_string(),
                expected: "sparse, medium, dense",
            }),
        }
    }
}

/// Glyph pool for falling-character effects.
///
/// `Katakana` is the wide-script set (half-width katakana block U+30A0..U+30FF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharSet {
    Digits,
    Letters,
    Katakana,
    #[default]
    Mixed,
}

impl CharSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharSet::Digits => "digits",
            CharSet::Letters => "letters",
            CharSet::Katakana => "katakana",
            CharSet::Mixed => "mixed",
        }
    }

    /// The glyphs belonging to this set.
    pub fn glyphs(&self) -> Vec<char> {
        const DIGITS: &str = "0123456789";
        const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
        match self {
            CharSet::Digits => DIGITS.chars().collect(),
            CharSet::Letters => LETTERS.chars().collect(),
            CharSet::Katakana => ('\u{30A0}'..='\u{30FF}').collect(),
            CharSet::Mixed => DIGITS
                .chars()
                .chain(LETTERS.chars())
                .chain('\u{30A0}'..='\u{30CF}')
                .collect(),
        }
    }
}

impl FromStr for CharSet {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "digits" => Ok(CharSet::Digits),
            "letters" => Ok(CharSet::Letters),
            "katakana" | "wide" => Ok(CharSet::Katakana),
            "mixed" => Ok(CharSet::Mixed),
            _ => Err(ParseOptionError {
                kind: "charset",
                value: s.to_string(),
                expected: "digits, letters, katakana, mixed",
            }),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
