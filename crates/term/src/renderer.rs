//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Only cells that changed since the previous frame are re-sent; a size change
//! or [`TerminalRenderer::invalidate`] forces a full redraw.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?;
            }
            _ => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .and_then(|_| self.stdout.flush())
            .context("write to terminal")
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<CellStyle> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
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

/// Encode only the changed runs between two equally sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<CellStyle> = None;

    for run in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = next.get(x, run.y).unwrap_or_default();
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    if current.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
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

/// Horizontal run of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Row-major iterator over maximal runs of cells that differ between frames.
///
/// Frames of different sizes yield every row of `next` as one run.
pub struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    pub fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self { prev, next, x: 0, y: 0 }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.width() != self.next.width()
            || self.prev.height() != self.next.height()
            || self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let w = self.next.width();
        while self.y < self.next.height() {
            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}
