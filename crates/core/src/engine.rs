//! Grid simulation engine - board, active piece and the movement rules
//!
//! The engine owns the board, the falling piece and a sticky game-over flag. It holds no
//! timers: a driver calls [`Engine::attempt_move`] with `(0, 1)` on its own gravity tick and
//! forwards discrete input events as moves and rotations.
//!
//! Expected conditions never surface as errors. A blocked move or rotation returns `false`;
//! fatal overflow sets the game-over flag and fires the registered handler once.
//!
//! # Example
//!
//! ```
//! use gioco_core::{Engine, EngineConfig};
//! use gioco_types::PieceKind;
//!
//! let mut engine = Engine::new(EngineConfig::seeded(7)).unwrap();
//! assert!(engine.spawn(PieceKind::O));
//! assert_eq!((engine.active().x, engine.active().y), (6, 0));
//!
//! // Gravity until the piece lands.
//! while engine.attempt_move(0, 1) {}
//! assert_eq!(engine.active().y, 18);
//!
//! engine.merge_active_into_board();
//! assert_eq!(engine.clear_full_lines(), 0);
//! assert!(engine.spawn_next());
//! ```

use std::fmt;

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::pieces::{catalog_shape, Shape};
use crate::rng::GameRng;
use crate::snapshot::EngineSnapshot;
use crate::types::{Color, PieceKind};
use crate::Board;

/// First collision found by [`collision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collision {
    /// A cell would sit at or below row `H`.
    Bottom,
    /// A cell would sit left of column 0 or at/after column `W`.
    Side,
    /// A cell would sit above row 0. Unrecoverable when produced by a rotation.
    Top,
    /// A cell would overlap a locked cell.
    Occupied,
}

/// The falling piece: a shape plus the board position of its top-left matrix corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// A catalog piece at its spawn position: horizontally centered, top row.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = catalog_shape(kind);
        Self {
            kind,
            color: kind.color(),
            shape,
            x: (board_width / 2) as i32 - (shape.width() / 2) as i32,
            y: 0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    pub fn board_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(r, c)| (self.x + c as i32, self.y + r as i32))
    }
}

/// Test `shape` anchored at `(x, y)` against the board.
///
/// Cells are visited in row-major order and the first violation is returned. For each
/// cell the checks run bottom, side, top, occupied.
pub fn collision(board: &Board, shape: &Shape, x: i32, y: i32) -> Option<Collision> {
    let (width, height) = (board.width() as i32, board.height() as i32);

    for (r, c) in shape.cells() {
        let bx = x + c as i32;
        let by = y + r as i32;

        if by >= height {
            return Some(Collision::Bottom);
        }
        if bx >= width || bx < 0 {
            return Some(Collision::Side);
        }
        if by < 0 {
            return Some(Collision::Top);
        }
        if board.is_occupied(bx, by) {
            return Some(Collision::Occupied);
        }
    }

    None
}

/// True if any cell of `shape` anchored at column `x` falls outside `[0, width)`.
fn violates_side(shape: &Shape, x: i32, width: usize) -> bool {
    shape.cells().iter().any(|&(_, c)| {
        let bx = x + c as i32;
        bx < 0 || bx >= width as i32
    })
}

/// Single-slot game-over handler.
pub type GameOverHandler = Box<dyn FnMut()>;

pub struct Engine {
    board: Board,
    active: ActivePiece,
    game_over: bool,
    rng: GameRng,
    on_game_over: Option<GameOverHandler>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("active", &self.active)
            .field("game_over", &self.game_over)
            .field("seed", &self.rng.seed())
            .field("on_game_over", &self.on_game_over.is_some())
            .finish()
    }
}

impl Engine {
    /// Create an engine with an empty board and a freshly spawned piece.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let kind = rng.next_standard_kind();

        debug!(
            "engine created: {}x{} board, seed {}",
            config.width,
            config.height,
            rng.seed()
        );

        Ok(Self {
            board: Board::new(config.width, config.height),
            active: ActivePiece::spawn(kind, config.width),
            game_over: false,
            rng,
            on_game_over: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups (puzzles, tests).
    ///
    /// Normal play only changes the board through merge, clear and reset.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Mutable access to the session RNG, shared with the bubble field.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Register the game-over handler, replacing any previous one.
    ///
    /// The handler runs once per transition of the game-over flag from clear to set.
    pub fn on_game_over(&mut self, handler: impl FnMut() + 'static) {
        self.on_game_over = Some(Box::new(handler));
    }

    /// Collision test for `shape` anchored at `(x, y)` against this engine's board.
    pub fn collision(&self, shape: &Shape, x: i32, y: i32) -> Option<Collision> {
        collision(&self.board, shape, x, y)
    }

    /// Move the active piece by `(dx, dy)` if the target is free.
    ///
    /// A `false` from a downward move means the piece has landed.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.active.x + dx, self.active.y + dy);
        if self.collision(&self.active.shape, x, y).is_some() {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        true
    }

    /// Rotate the active piece 90° clockwise around its approximate center.
    ///
    /// Either shape and anchor both change or neither does. A rejected placement that
    /// pokes past a side wall clears the board and signals game-over; one stopped by the
    /// ceiling signals game-over and leaves the board alone.
    pub fn rotate(&mut self) -> bool {
        let current = self.active.shape;
        let rotated = current.rotated_cw();

        let dx = (current.width() / 2) as i32 - (rotated.width() / 2) as i32;
        let dy = (current.height() / 2) as i32 - (rotated.height() / 2) as i32;
        let (x, y) = (self.active.x + dx, self.active.y + dy);

        let Some(hit) = self.collision(&rotated, x, y) else {
            self.active.shape = rotated;
            self.active.x = x;
            self.active.y = y;
            return true;
        };

        if violates_side(&rotated, x, self.board.width()) {
            warn!(
                "rotation of {:?} at ({}, {}) crossed a side wall ({:?}); resetting",
                self.active.kind, self.active.x, self.active.y, hit
            );
            self.board.clear();
            self.signal_game_over();
        } else if hit == Collision::Top {
            warn!(
                "rotation of {:?} at ({}, {}) hit the ceiling",
                self.active.kind, self.active.x, self.active.y
            );
            self.signal_game_over();
        }

        false
    }

    /// Write the active piece's color into the board.
    ///
    /// Returns `false` if a cell lies above row 0. Cells visited before that one stay
    /// written and game-over is signalled.
    pub fn merge_active_into_board(&mut self) -> bool {
        let ActivePiece { color, x, y, .. } = self.active;

        for (r, c) in self.active.shape.cells() {
            let bx = x + c as i32;
            let by = y + r as i32;
            if by < 0 {
                warn!(
                    "{:?} merged above the board at ({}, {})",
                    self.active.kind, bx, by
                );
                self.signal_game_over();
                return false;
            }
            self.board.set(bx, by, Some(color));
        }

        debug!("merged {:?} at ({}, {})", self.active.kind, x, y);
        true
    }

    /// Remove full rows (see [`Board::clear_full_lines`]) and return how many were removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            debug!("cleared {} line(s)", cleared);
        }
        cleared
    }

    /// Spawn a uniformly random standard piece.
    pub fn spawn_next(&mut self) -> bool {
        let kind = self.rng.next_standard_kind();
        self.spawn(kind)
    }

    /// Spawn `kind` at its spawn position.
    ///
    /// If the spawn position is blocked the piece is not installed and game-over is
    /// signalled; the board is left untouched.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind, self.board.width());
        if let Some(hit) = self.collision(&piece.shape, piece.x, piece.y) {
            warn!(
                "spawn of {:?} at ({}, {}) blocked ({:?})",
                kind, piece.x, piece.y, hit
            );
            self.signal_game_over();
            return false;
        }

        debug!("spawned {:?} at ({}, {})", kind, piece.x, piece.y);
        self.active = piece;
        true
    }

    /// Replace the active piece's kind, color and shape, keeping its anchor.
    ///
    /// Refused (returns `false`) when the new shape would collide at the current anchor.
    pub fn replace_active(&mut self, kind: PieceKind) -> bool {
        let shape = catalog_shape(kind);
        if self.collision(&shape, self.active.x, self.active.y).is_some() {
            return false;
        }
        self.active.kind = kind;
        self.active.color = kind.color();
        self.active.shape = shape;
        true
    }

    /// Install `piece` as the active piece without any collision test.
    ///
    /// Intended for scripted setups; regular play goes through [`Engine::spawn`].
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    /// Empty every board cell. The game-over flag is left as is.
    pub fn reset_board(&mut self) {
        self.board.clear();
    }

    /// Clear the game-over flag so the next transition notifies again.
    pub fn clear_game_over(&mut self) {
        self.game_over = false;
    }

    fn signal_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        if let Some(handler) = self.on_game_over.as_mut() {
            handler();
        }
    }

    /// Copy the read surface into an existing snapshot, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = self.active;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::new(self.active);
        self.snapshot_into(&mut s);
        s
    }
}
