//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the key mapping and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (the engine accepts other sizes at construction):
//!
//! - **Width**: 15 columns (indexed 0-14)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: `(floor(W/2) - floor(shape_width/2), 0)`
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the frontend loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 (divided by the level) |
//!
//! # Scoring
//!
//! | Lines | Points |
//! |-------|--------|
//! | 1 | 100 |
//! | 2 | 200 |
//! | 3 | 400 |
//! | 4 | 800 |
//! | n > 4 | n * 1200 + 800 |
//!
//! # Examples
//!
//! ```
//! use gioco_types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color(), Color::new(0x800080));
//! assert!(!PieceKind::STANDARD.contains(&PieceKind::Special));
//!
//! assert_eq!(BOARD_WIDTH, 15);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (15 columns)
pub const BOARD_WIDTH: u8 = 15;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest board dimension accepted by the engine.
pub const MAX_BOARD_DIMENSION: u8 = 64;

/// Side length of the storage used for piece matrices (the I piece is 4x4).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1; the interval at level `n` is `BASE_DROP_MS / n`.
pub const BASE_DROP_MS: u32 = 1000;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh session starts at.
pub const START_LEVEL: u32 = 1;

/// Points for clearing one line.
pub const SCORE_SINGLE: u32 = 100;

/// Points for clearing two lines at once.
pub const SCORE_DOUBLE: u32 = 200;

/// Points for clearing three lines at once.
pub const SCORE_TRIPLE: u32 = 400;

/// Points for clearing four lines at once.
pub const SCORE_QUADRUPLE: u32 = 800;

/// Per-line points for clears of more than four lines (added to `SCORE_QUADRUPLE`).
pub const SCORE_CONSECUTIVE: u32 = 1200;

/// Points for each manual soft drop key press.
pub const SCORE_SOFT_DROP: u32 = 1;

/// Score at which bubbles start spawning.
pub const BUBBLE_SCORE_THRESHOLD: u32 = 250;

/// Bonus awarded when a bubble clears the whole grid.
pub const GRID_CLEAR_BONUS: u32 = 1000;

/// Maximum number of bubbles alive at once (one per number key).
pub const MAX_BUBBLES: usize = 9;

/// Number of entries kept in the high-score ledger.
pub const MAX_HIGH_SCORES: usize = 5;

/// Opaque 24-bit RGB color token stored in board cells.
///
/// The engine never interprets the value; renderers map it to whatever palette they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Split into `(r, g, b)` components.
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// The piece kinds: seven standard tetrominoes plus the special single-cell piece
///
/// Each kind has a fixed color token:
/// - **I**: Cyan, 4x4 matrix with a horizontal bar
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
/// - **Special**: Mint white, 1x1 (only produced by the bubble mini-game)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    Special,
}

impl PieceKind {
    /// The seven kinds eligible for random spawning.
    pub const STANDARD: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color token painted into the board when this kind is merged.
    pub const fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::new(0x00ffff),
            PieceKind::J => Color::new(0x0000ff),
            PieceKind::L => Color::new(0xffa500),
            PieceKind::O => Color::new(0xffff00),
            PieceKind::S => Color::new(0x00ff00),
            PieceKind::T => Color::new(0x800080),
            PieceKind::Z => Color::new(0xff0000),
            PieceKind::Special => Color::new(0xf5fffa),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked cell carrying the color of the piece that filled it
pub type Cell = Option<Color>;

/// Actions dispatched into a session by human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (awards one point per press)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start or resume the session
    Start,
    /// Pause the session
    Pause,
    /// Record the current run and reset everything
    Restart,
    /// Pop the n-th visible bubble (1-based, as shown on screen)
    PopBubble(u8),
}
