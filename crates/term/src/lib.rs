//! Terminal frontend.
//!
//! A small, game-oriented rendering layer: a [`GameView`] paints a
//! [`SessionSnapshot`](crate::core::SessionSnapshot) into a [`FrameBuffer`] of styled
//! characters, and the [`TerminalRenderer`] flushes only the cells that changed since the
//! previous frame.
//!
//! Board cells are two columns wide to compensate for the usual glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gioco_core as core;
pub use gioco_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
