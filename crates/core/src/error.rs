//! Error types for board construction and configuration.

use crate::types::{MAX_SIZE, MAX_TILE, MIN_SIZE};

/// Rejected board input. Boards are never silently truncated or padded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board: a {size}x{size} grid needs {expected} cells, got {actual}")]
    InvalidBoard {
        size: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported board size {0} (expected {min}..={max})", min = MIN_SIZE, max = MAX_SIZE)]
    UnsupportedSize(usize),
    #[error("tile {value} at cell {index} exceeds the largest tile {max}", max = MAX_TILE)]
    TileTooLarge { index: usize, value: u32 },
}

/// Rejected configuration value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Parse { var: &'static str, value: String },
    #[error("{var}: {value} is out of range ({reason})")]
    OutOfRange {
        var: &'static str,
        value: u64,
        reason: &'static str,
    },
}
