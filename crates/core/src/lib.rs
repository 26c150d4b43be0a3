//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the grid simulation and the session rules built on top of it.
//! It has **no dependencies** on the terminal or any I/O besides the high-score file:
//!
//! - **Deterministic**: a fixed seed reproduces the same pieces and bubble outcomes
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: runs headless, in the terminal frontend or in benchmarks
//!
//! # Module Structure
//!
//! - [`board`]: W x H grid of optional color tokens with full-line removal
//! - [`pieces`]: shape matrices, the piece catalog and clockwise rotation
//! - [`engine`]: active piece, collision test, movement, rotation, merge and spawn
//! - [`rng`]: seedable uniform piece selection and bubble rolls
//! - [`scoring`]: line-clear rewards, level progression and gravity speed
//! - [`bubbles`]: falling bubbles and their random rewards
//! - [`highscores`]: the persisted top-5 ledger
//! - [`session`]: phases, gravity timing and game-over bookkeeping
//! - [`snapshot`]: owned read surfaces for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every standard piece is equally likely on each spawn
//! - **Plain rotation**: 90° clockwise around the approximate center, no wall kicks
//! - **No lock delay**: a piece locks on the first gravity step it cannot fall
//! - **Fatal overflow**: merging above the board, a blocked spawn, or a rotation that
//!   pokes past a side wall ends the run
//!
//! # Example
//!
//! ```
//! use gioco_core::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::seeded(12345)).unwrap();
//! engine.attempt_move(1, 0);
//! engine.rotate();
//! while engine.attempt_move(0, 1) {}
//! assert!(engine.merge_active_into_board());
//! assert_eq!(engine.board().filled_count(), engine.active().shape.cell_count());
//! ```

pub mod board;
pub mod bubbles;
pub mod config;
pub mod engine;
pub mod error;
pub mod highscores;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use gioco_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use bubbles::{Bubble, BubbleField, BubbleReward};
pub use config::EngineConfig;
pub use engine::{collision, ActivePiece, Collision, Engine, GameOverHandler};
pub use error::{ConfigError, HighScoreError, ShapeError};
pub use highscores::{HighScoreEntry, HighScoreLedger};
pub use pieces::{catalog_shape, Shape};
pub use rng::GameRng;
pub use scoring::{drop_interval_ms, line_clear_score, LevelProgress};
pub use session::{GameSession, Phase, MAX_STEPS_PER_TICK};
pub use snapshot::{EngineSnapshot, SessionSnapshot};
