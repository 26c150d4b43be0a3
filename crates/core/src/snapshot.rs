use crate::bubbles::Bubble;
use crate::engine::ActivePiece;
use crate::highscores::HighScoreEntry;
use crate::session::Phase;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Owned copy of the engine's read surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major board cells (`y * width + x`).
    pub cells: Vec<Cell>,
    pub active: ActivePiece,
    pub game_over: bool,
}

impl EngineSnapshot {
    /// An empty default-sized snapshot holding `active`.
    pub fn new(active: ActivePiece) -> Self {
        let (width, height) = (BOARD_WIDTH as usize, BOARD_HEIGHT as usize);
        Self {
            width,
            height,
            cells: vec![None; width * height],
            active,
            game_over: false,
        }
    }

    /// Locked color at `(x, y)`; `None` for empty or out-of-range cells.
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Color shown at `(x, y)`: the active piece over the locked cells.
    pub fn visible_cell(&self, x: usize, y: usize) -> Option<Color> {
        let on_active = self
            .active
            .board_cells()
            .any(|(ax, ay)| ax == x as i32 && ay == y as i32);
        if on_active && !self.game_over {
            return Some(self.active.color);
        }
        self.cell(x, y)
    }
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub engine: EngineSnapshot,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    /// Lines counted toward the next level.
    pub level_lines: u32,
    pub total_lines: u32,
    pub elapsed_ms: u64,
    pub bubbles: Vec<Bubble>,
    pub high_scores: Vec<HighScoreEntry>,
    /// Last bubble outcome or status line, if any.
    pub message: Option<String>,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running && !self.engine.game_over
    }

    /// Elapsed play time as `(minutes, seconds)`.
    pub fn clock(&self) -> (u64, u64) {
        let secs = self.elapsed_ms / 1000;
        (secs / 60, secs % 60)
    }
}
