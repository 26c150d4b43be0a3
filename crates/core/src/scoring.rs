//! Scoring module - line clear rewards, level progression and gravity speed
//!
//! The reward table is flat (no level multiplier): 100/200/400/800 for one to four lines,
//! and `n * 1200 + 800` for anything larger, which only boards taller than the catalog's
//! pieces can ever produce through chained clears.

use crate::types::{
    BASE_DROP_MS, LINES_PER_LEVEL, SCORE_CONSECUTIVE, SCORE_DOUBLE, SCORE_QUADRUPLE,
    SCORE_SINGLE, SCORE_TRIPLE, START_LEVEL,
};

/// Points for clearing `lines` rows in one lock.
pub fn line_clear_score(lines: u32) -> u32 {
    match lines {
        0 => 0,
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        4 => SCORE_QUADRUPLE,
        n => n
            .saturating_mul(SCORE_CONSECUTIVE)
            .saturating_add(SCORE_QUADRUPLE),
    }
}

/// Gravity interval for a level: `BASE_DROP_MS / level`, never below 1ms.
pub fn drop_interval_ms(level: u32) -> u32 {
    (BASE_DROP_MS / level.max(1)).max(1)
}

/// Level and the lines counted toward the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    level: u32,
    /// Lines cleared since the last level-up.
    counter: u32,
    /// Lines cleared this session.
    total_lines: u32,
}

impl LevelProgress {
    pub fn new() -> Self {
        Self {
            level: START_LEVEL,
            counter: 0,
            total_lines: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Count cleared lines and return `true` if the level went up.
    ///
    /// Reaching `LINES_PER_LEVEL` raises the level by exactly one and resets the counter
    /// to zero; surplus lines are not carried over.
    pub fn record_lines(&mut self, lines: u32) -> bool {
        self.total_lines = self.total_lines.saturating_add(lines);
        self.counter = self.counter.saturating_add(lines);
        if self.counter >= LINES_PER_LEVEL {
            self.level += 1;
            self.counter = 0;
            return true;
        }
        false
    }
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}
