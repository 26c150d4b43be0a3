//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`]) is
//! a full redraw. Every other frame only rewrites the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use log::debug;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Previously presented frame, `None` until the first draw.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.active = true;
        debug!("terminal renderer entered alternate screen");
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        debug!("terminal renderer restored the terminal");
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds the older frame so the caller can render into it again
    /// without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Best effort: a panic or early return must not leave the terminal in raw mode.
        let _ = self.exit();
    }
}

/// Tracks the style last emitted so unchanged attributes are not repeated.
#[derive(Default)]
struct StyleState {
    current: Option<CellStyle>,
}

impl StyleState {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current;
        if prev == Some(style) {
            return Ok(());
        }

        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            // Resetting attributes also resets colors, so both are re-sent below.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map_or(true, |p| p.fg != style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.map_or(true, |p| p.bg != style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }

        self.current = Some(style);
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = StyleState::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            style.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs between two equally sized frames into `out`.
///
/// Nothing is written when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = StyleState::default();
    let mut cursor_at: Option<(u16, u16)> = None;
    let mut wrote = false;

    for_each_changed_run(prev, next, |x, y, len| {
        if cursor_at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            style.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        cursor_at = Some((x + len, y));
        wrote = true;
        Ok(())
    })?;

    if wrote {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
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

/// Call `f(x, y, len)` for each horizontal run of cells that differ between the frames.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width() as usize;
    if w == 0 {
        return Ok(());
    }
    for (y, (a, b)) in prev
        .cells()
        .chunks(w)
        .zip(next.cells().chunks(w))
        .enumerate()
    {
        let mut x = 0;
        while x < w {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && a[x] != b[x] {
                x += 1;
            }
            f(start as u16, y as u16, (x - start) as u16)?;
        }
    }

    Ok(())
}
