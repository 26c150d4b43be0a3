//! Engine configuration.

use crate::error::ConfigError;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIMENSION, MAX_SHAPE_SIZE};

/// Board size and RNG seed for a new [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Seed for piece selection. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default 15x20 board with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check the dimensions against what the shape catalog and coordinate space support.
    ///
    /// # Examples
    ///
    /// ```
    /// use gioco_core::{ConfigError, EngineConfig};
    ///
    /// assert!(EngineConfig::default().validate().is_ok());
    /// assert!(matches!(
    ///     EngineConfig::default().with_size(0, 20).validate(),
    ///     Err(ConfigError::ZeroDimension { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        let max = MAX_BOARD_DIMENSION as usize;
        if width > max || height > max {
            return Err(ConfigError::TooLarge { width, height, max });
        }
        if width < MAX_SHAPE_SIZE || height < MAX_SHAPE_SIZE {
            return Err(ConfigError::TooSmall {
                width,
                height,
                min: MAX_SHAPE_SIZE,
            });
        }
        Ok(())
    }
}
