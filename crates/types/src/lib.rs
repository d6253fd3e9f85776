//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! They are plain data with no game logic, so the engine, the terminal view and
//! the key mapping can all share them.
//!
//! # Board Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_SIZE` | 4 | Classic 4x4 grid |
//! | `MIN_SIZE` | 2 | Smallest playable grid |
//! | `MAX_SIZE` | 8 | Largest grid the fixed-capacity board can hold |
//!
//! # Spawn Policy
//!
//! New tiles are 2 with probability 0.9 and 4 otherwise (`SPAWN_FOUR_PROBABILITY`).
//! Tiles top out at `MAX_TILE` (2^31), the largest power of two in a `u32`.
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GameStatus, DEFAULT_WIN_TILE};
//!
//! let dir = Direction::from_str("LEFT").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! let action = GameAction::from_str("up").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! assert!(!GameStatus::Playing.is_terminal());
//! assert_eq!(DEFAULT_WIN_TILE, 2048);
//! ```

use serde::{Deserialize, Serialize};

/// Default board edge length (4x4).
pub const DEFAULT_SIZE: usize = 4;

/// Smallest supported board edge length.
pub const MIN_SIZE: usize = 2;

/// Largest supported board edge length.
pub const MAX_SIZE: usize = 8;

/// Cell capacity of the largest supported board.
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE;

/// Tile value that wins the game by default.
pub const DEFAULT_WIN_TILE: u32 = 2048;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Number of tiles placed on a fresh board.
pub const INITIAL_TILES: usize = 2;

/// Largest tile a `u32` cell can hold. Tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// The four slide directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order used by `legal_moves`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether this direction slides along rows (as opposed to columns).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Player intents, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward one edge
    Move(Direction),
    /// Throw the current session away and deal a fresh board
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Direction names map to `Move`, "restart" maps to `Restart`.
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("restart") {
            return Some(GameAction::Restart);
        }
        Direction::from_str(s).map(GameAction::Move)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Restart => "restart",
        }
    }
}

/// Session status.
///
/// `Won` and `Lost` are terminal: a new session replaces the old one instead
/// of transitioning out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}
