//! Game configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TUI2048_SIZE` | 4 | Board edge length (2..=8) |
//! | `TUI2048_WIN_TILE` | 2048 | Tile value that wins (power of two, at least 8) |
//! | `TUI2048_SEED` | unset | Fixed RNG seed; unset means seed from entropy |
//!
//! Blank values fall back to the default.

use crate::error::ConfigError;
use crate::types::{DEFAULT_SIZE, DEFAULT_WIN_TILE, MAX_SIZE, MIN_SIZE};

pub const SIZE_VAR: &str = "TUI2048_SIZE";
pub const WIN_TILE_VAR: &str = "TUI2048_WIN_TILE";
pub const SEED_VAR: &str = "TUI2048_SEED";

/// Smallest accepted win tile. A 4 can be spawned directly, so anything lower
/// would be won before the first move.
pub const MIN_WIN_TILE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub win_tile: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_tile: DEFAULT_WIN_TILE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(size) = parse_var::<usize>(&lookup, SIZE_VAR)? {
            config.size = size;
        }
        if let Some(win_tile) = parse_var::<u32>(&lookup, WIN_TILE_VAR)? {
            config.win_tile = win_tile;
        }
        config.seed = parse_var::<u64>(&lookup, SEED_VAR)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::OutOfRange {
                var: SIZE_VAR,
                value: self.size as u64,
                reason: "board size must be between 2 and 8",
            });
        }
        if !self.win_tile.is_power_of_two() || self.win_tile < MIN_WIN_TILE {
            return Err(ConfigError::OutOfRange {
                var: WIN_TILE_VAR,
                value: self.win_tile as u64,
                reason: "win tile must be a power of two, at least 8",
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Parse {
            var,
            value: raw.clone(),
        })
}
