//! Environment-driven configuration for the terminal binary.

use std::env;
use std::path::PathBuf;

use crate::core::EngineConfig;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Default ledger file, relative to the working directory.
pub const DEFAULT_HIGHSCORES_PATH: &str = "gioco-highscores.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed seed for a reproducible run; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub width: usize,
    pub height: usize,
    pub highscores_path: PathBuf,
    /// Log file; logging stays quiet unless this (or `RUST_LOG`) is set.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            highscores_path: PathBuf::from(DEFAULT_HIGHSCORES_PATH),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Read `GIOCO_SEED`, `GIOCO_WIDTH`, `GIOCO_HEIGHT`, `GIOCO_HIGHSCORES_PATH` and
    /// `GIOCO_LOG_PATH`. Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = non_empty("GIOCO_SEED").and_then(|s| s.parse().ok());
        let width = non_empty("GIOCO_WIDTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.width);
        let height = non_empty("GIOCO_HEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.height);
        let highscores_path = non_empty("GIOCO_HIGHSCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.highscores_path);
        let log_path = non_empty("GIOCO_LOG_PATH").map(PathBuf::from);

        Self {
            seed,
            width,
            height,
            highscores_path,
            log_path,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
        }
    }
}
