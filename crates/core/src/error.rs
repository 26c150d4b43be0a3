//! Error types for construction-time validation and ledger persistence.
//!
//! Gameplay itself never errors: blocked moves and game-over are reported through
//! return values and the engine's game-over flag.

use std::io;

use thiserror::Error;

/// Errors raised while building a piece shape from a raw matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The matrix has no rows or no columns.
    #[error("shape matrix is empty")]
    Empty,

    /// Rows have different lengths.
    #[error("shape row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// The matrix does not fit in the fixed shape storage.
    #[error("shape matrix is {rows}x{cols}, at most {max}x{max} is supported")]
    TooLarge {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
        /// Largest supported side.
        max: usize,
    },

    /// Every cell of the matrix is empty.
    #[error("shape matrix has no occupied cells")]
    NoCells,
}

/// Errors raised when validating an engine configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("board dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Width or height exceeds the supported maximum.
    #[error("board dimensions {width}x{height} exceed the maximum of {max}")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Largest supported side.
        max: usize,
    },

    /// The board cannot hold the largest catalog piece in every orientation.
    #[error("board {width}x{height} is smaller than the {min}x{min} needed by the catalog")]
    TooSmall {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Smallest supported side.
        min: usize,
    },
}

/// Errors raised while loading or saving the high-score ledger.
#[derive(Error, Debug)]
pub enum HighScoreError {
    /// Reading or writing the ledger file failed.
    #[error("high-score file {path}: {source}")]
    Io {
        /// Ledger path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The ledger file is not valid JSON for the expected structure.
    #[error("high-score file {path} is malformed: {source}")]
    Json {
        /// Ledger path.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}
