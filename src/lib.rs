//! Gioco (workspace facade crate).
//!
//! Re-exports the member crates as `gioco::{core, input, term, types}` and hosts the
//! binary's environment configuration.

pub mod config;

pub use gioco_core as core;
pub use gioco_input as input;
pub use gioco_term as term;
pub use gioco_types as types;

pub use config::AppConfig;
