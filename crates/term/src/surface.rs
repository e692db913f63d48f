//! TerminalSurface: a framebuffer flushed to a real terminal.
//!
//! Effects draw into the back buffer through [`Surface`]; `show` encodes the
//! whole grid as one batch of crossterm commands and writes it in a single
//! `write_all`. There is no diffing: every frame repaints every cell.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::{Cell, CellStyle, FrameBuffer, Rgb, Surface, SurfaceError};

pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    back: FrameBuffer,
    buf: Vec<u8>,
    needs_clear: bool,
}

impl TerminalSurface<Stdout> {
    /// Surface sized to the current terminal.
    pub fn new() -> Result<Self, SurfaceError> {
        let (w, h) = terminal::size()?;
        Ok(Self::with_writer(io::stdout(), w, h))
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_writer(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            back: FrameBuffer::new(width, height),
            buf: Vec::with_capacity(64 * 1024),
            needs_clear: true,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<(), SurfaceError> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.needs_clear = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<(), SurfaceError> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// The back buffer as it will appear after the next `show`.
    pub fn frame(&self) -> &FrameBuffer {
        &self.back
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u16, u16) {
        self.back.size()
    }

    fn clear(&mut self) {
        self.back.clear();
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.back.set(x, y, Cell { ch, style });
    }

    fn show(&mut self) -> Result<(), SurfaceError> {
        self.buf.clear();
        if self.needs_clear {
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            self.needs_clear = false;
        }
        encode_frame_into(&self.back, &mut self.buf)?;
        self.flush_buf()?;
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SurfaceError> {
        self.needs_clear = true;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.back.resize(width, height);
        self.needs_clear = true;
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x as i32, y as i32).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::palette;

    fn surface(w: u16, h: u16) -> TerminalSurface<Vec<u8>> {
        TerminalSurface::with_writer(Vec::new(), w, h)
    }

    fn printed(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn show_writes_every_cell_in_one_frame() {
        let mut s = surface(3, 2);
        s.put_str(0, 0, "abc", CellStyle::fg(palette::GREEN));
        s.set_cell(1, 1, 'Z', CellStyle::default());
        s.show().unwrap();

        let text = printed(s.writer());
        assert!(text.contains("abc"));
        assert!(text.contains(" Z "));
        assert!(text.contains("\r\n"));
    }

    #[test]
    fn clears_the_screen_only_after_sync() {
        let clear = {
            let mut v = Vec::new();
            v.queue(terminal::Clear(terminal::ClearType::All)).unwrap();
            printed(&v)
        };

        let mut s = surface(2, 1);
        s.show().unwrap();
        assert_eq!(printed(s.writer()).matches(&clear).count(), 1);
        s.show().unwrap();
        assert_eq!(printed(s.writer()).matches(&clear).count(), 1);
        s.sync().unwrap();
        s.show().unwrap();
        assert_eq!(printed(s.writer()).matches(&clear).count(), 2);
    }

    #[test]
    fn style_runs_are_coalesced() {
        let mut fb = FrameBuffer::new(4, 1);
        let red = CellStyle::fg(palette::RED);
        for x in 0..4 {
            fb.set(x, 0, Cell { ch: '#', style: red });
        }
        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();

        let mut one = Vec::new();
        one.queue(SetForegroundColor(rgb_to_color(palette::RED))).unwrap();
        assert_eq!(printed(&out).matches(&printed(&one)).count(), 1);
        assert!(printed(&out).contains("####"));
    }

    #[test]
    fn writes_outside_are_clipped_and_resize_blanks() {
        let mut s = surface(2, 2);
        s.set_cell(5, 5, 'x', CellStyle::default());
        assert_eq!(s.frame().non_blank_count(), 0);
        s.set_cell(1, 1, 'x', CellStyle::default());
        s.resize(4, 3);
        assert_eq!(s.size(), (4, 3));
        assert_eq!(s.frame().non_blank_count(), 0);
    }
}
