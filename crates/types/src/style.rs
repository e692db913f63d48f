//! Color and per-cell style types.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: palette::LIGHT_GRAY,
            bg: palette::BLACK,
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    /// Default style with the given foreground.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: palette::BLACK,
            bold: false,
            dim: false,
        }
    }

    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// Named colors shared by the effects.
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const LIGHT_GRAY: Rgb = Rgb::new(220, 220, 220);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const DARK_GRAY: Rgb = Rgb::new(80, 80, 80);

    pub const RED: Rgb = Rgb::new(230, 40, 40);
    pub const DARK_RED: Rgb = Rgb::new(139, 0, 0);
    pub const LIGHT_CORAL: Rgb = Rgb::new(240, 128, 128);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 230, 0);
    pub const LIGHT_YELLOW: Rgb = Rgb::new(255, 255, 180);
    pub const LIME: Rgb = Rgb::new(0, 255, 0);
    pub const LIGHT_GREEN: Rgb = Rgb::new(144, 238, 144);
    pub const GREEN: Rgb = Rgb::new(0, 190, 0);
    pub const DARK_GREEN: Rgb = Rgb::new(0, 100, 0);
    pub const TEAL: Rgb = Rgb::new(0, 128, 128);
    pub const LIGHT_CYAN: Rgb = Rgb::new(180, 255, 255);
    pub const CYAN: Rgb = Rgb::new(0, 220, 220);
    pub const LIGHT_BLUE: Rgb = Rgb::new(150, 200, 255);
    pub const BLUE: Rgb = Rgb::new(40, 90, 255);
    pub const DARK_BLUE: Rgb = Rgb::new(0, 0, 139);
    pub const CADET_BLUE: Rgb = Rgb::new(95, 158, 160);
    pub const PURPLE: Rgb = Rgb::new(160, 60, 220);
    pub const PINK: Rgb = Rgb::new(255, 150, 200);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn builder_sets_flags() {
        let s = CellStyle::fg(palette::RED).bold();
        assert_eq!(s.fg, palette::RED);
        assert!(s.bold);
        assert!(!s.dim);
    }
}
