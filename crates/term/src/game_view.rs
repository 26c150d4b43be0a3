//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Phase, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Side panel needs at least this many columns to be drawn at all.
const MIN_PANEL_W: u16 = 14;

/// A lightweight terminal view of a game session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Top-left corner and outer size of the bordered playfield.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board = &snap.engine;
        let board_px_w = (board.width as u16).saturating_mul(self.cell_w);
        let board_px_h = (board.height as u16).saturating_mul(self.cell_h);
        let panel_w = MIN_PANEL_W + 10;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2 + panel_w) / 2,
            y: viewport.height.saturating_sub(board_px_h + 2) / 2,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, frame, border);

        for y in 0..board.height {
            for x in 0..board.width {
                match board.visible_cell(x, y) {
                    Some(color) => {
                        let style = CellStyle::new(Rgb::from(color), PLAYFIELD_BG).bold();
                        self.fill_cell_rect(fb, frame, x as u16, y as u16, '█', style);
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_cell_rect(fb, frame, x as u16, y as u16, '·', style);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        let overlay = match snap.phase {
            Phase::Ready => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::GameOver => Some("GAME OVER"),
            Phase::Running => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.total_lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        let (minutes, seconds) = snap.clock();
        fb.put_str(panel_x, y, "TIME", label);
        fb.put_fmt(panel_x, y + 1, format_args!("{minutes}:{seconds:02}"), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "BUBBLES", label);
        y = y.saturating_add(1);
        if snap.bubbles.is_empty() {
            fb.put_str(panel_x, y, "-", dim);
            y = y.saturating_add(1);
        }
        for (i, bubble) in snap.bubbles.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            fb.put_fmt(
                panel_x,
                y,
                format_args!("[{}] h{:>3.0}", i + 1, bubble.height),
                value,
            );
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        for (i, entry) in snap.high_scores.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            fb.put_fmt(
                panel_x,
                y,
                format_args!(
                    "{}. {} L{} {}:{:02}",
                    i + 1,
                    entry.score,
                    entry.level,
                    entry.minutes,
                    entry.seconds
                ),
                value,
            );
            y = y.saturating_add(1);
        }

        if let Some(message) = snap.message.as_deref() {
            let msg_y = frame.y.saturating_add(frame.h).saturating_sub(1);
            fb.put_str(panel_x, msg_y, message, CellStyle::new(Rgb::new(255, 220, 120), PANEL_BG));
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
