//! Grid surface capability and the in-memory framebuffer.
//!
//! Effects only ever talk to `dyn Surface`. Coordinates are signed so callers
//! can compute positions that fall off the grid; such writes are silently
//! clipped.

use crate::error::SurfaceError;
use crate::types::CellStyle;

/// Character-grid output.
pub trait Surface {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Reset every cell to a blank space in the default style.
    fn clear(&mut self);

    /// Write one cell. Out-of-bounds writes are ignored.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle);

    /// Flush all pending writes as one frame.
    fn show(&mut self) -> Result<(), SurfaceError>;

    /// Force the next `show` to repaint everything (after a resize).
    fn sync(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    /// Adopt new dimensions, keeping the allocation where possible.
    fn resize(&mut self, width: u16, height: u16);

    /// Write a string left to right starting at `(x, y)`, clipping at the edges.
    fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            self.set_cell(x + i as i32, y, ch, style);
        }
    }

    /// Write a string horizontally centered on row `y`.
    fn put_str_centered(&mut self, y: i32, s: &str, style: CellStyle) {
        let (w, _) = self.size();
        let len = s.chars().count() as i32;
        let x = ((w as i32 - len) / 2).max(0);
        self.put_str(x, y, s, style);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set_cell(x + dx, y + dy, ch, style);
            }
        }
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
///
/// Used directly as a headless [`Surface`] (where `show` only counts frames)
/// and as the back buffer of the terminal surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    frames: u64,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            frames: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of frames flushed through [`Surface::show`].
    pub fn frames_shown(&self) -> u64 {
        self.frames
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Row `y` as a string (empty when out of range).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = (y as usize) * (self.width as usize);
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Every row joined with newlines.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            out.push_str(&self.row_text(y));
            out.push('\n');
        }
        out
    }

    /// Count of cells holding anything other than a space.
    pub fn non_blank_count(&self) -> usize {
        self.cells.iter().filter(|c| c.ch != ' ').count()
    }

    pub fn count_char(&self, ch: char) -> usize {
        self.cells.iter().filter(|c| c.ch == ch).count()
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    fn show(&mut self) -> Result<(), SurfaceError> {
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_clipped() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        fb.set_cell(-1, 0, 'X', style);
        fb.set_cell(0, -1, 'X', style);
        fb.set_cell(3, 0, 'X', style);
        fb.set_cell(0, 2, 'X', style);
        assert_eq!(fb.non_blank_count(), 0);

        fb.set_cell(2, 1, 'X', style);
        assert_eq!(fb.get(2, 1).unwrap().ch, 'X');
        assert_eq!(fb.non_blank_count(), 1);
    }

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abcdef", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ab");

        fb.clear();
        fb.put_str(-2, 0, "abcdef", CellStyle::default());
        assert_eq!(fb.row_text(0), "cdef");
    }

    #[test]
    fn centered_text_starts_at_offset() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.put_str_centered(0, "abcd", CellStyle::default());
        assert_eq!(fb.row_text(0), "   abcd   ");
    }

    #[test]
    fn resize_blanks_content() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_cell(1, 1, '#', CellStyle::default());
        fb.resize(3, 1);
        assert_eq!(fb.size(), (3, 1));
        assert_eq!(fb.cells().len(), 3);
        assert_eq!(fb.non_blank_count(), 0);
    }

    #[test]
    fn show_counts_frames() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.show().unwrap();
        fb.show().unwrap();
        assert_eq!(fb.frames_shown(), 2);
    }
}
