//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key press is one
//! discrete action; there is no auto-repeat handling beyond what the terminal sends.

pub mod map;

pub use gioco_types as types;

pub use map::{handle_key_event, should_quit};
