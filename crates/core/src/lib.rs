//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the 2048 rules and the session that drives them. It has
//! no UI or terminal dependencies, so the same engine can run headless, in
//! tests, or behind the terminal front end.
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid, slide/merge, move detection and tile spawning
//! - [`game_state`]: one session (board, score, status) built on the board rules
//! - [`rng`]: injectable randomness for spawns
//! - [`snapshot`]: plain copy of a session for renderers
//! - [`config`]: environment-driven settings
//! - [`error`]: board and configuration errors
//!
//! # Game Rules
//!
//! - **Slide**: every tile moves as far as possible toward the chosen edge
//! - **Merge**: two equal neighbours fuse into their sum; a tile merges at most once per move
//! - **Score**: each merge adds the tile it produced; the board sum itself never changes on a slide
//! - **Spawn**: after a move that changed the board, a 2 (90%) or 4 (10%) appears on a random empty cell
//! - **Win**: a tile equal to the win threshold (2048 by default) appears
//! - **Loss**: the board is full and no two orthogonal neighbours are equal
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{Board, GameState, MoveOutcome};
//! use tui_2048_core::types::Direction;
//!
//! let board = Board::from_cells(4, &[
//!     2, 2, 2, 2,
//!     0, 0, 0, 0,
//!     0, 0, 0, 0,
//!     0, 0, 0, 0,
//! ]).unwrap();
//!
//! let result = board.apply_move(Direction::Left);
//! assert!(result.moved);
//! assert_eq!(result.score_delta, 8);
//! assert_eq!(result.board.row(0).unwrap(), &[4, 4, 0, 0]);
//!
//! let mut game = GameState::seeded(12345).unwrap();
//! let outcome = game.handle_move(Direction::Up);
//! assert!(matches!(outcome, MoveOutcome::Applied { .. } | MoveOutcome::Rejected));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

pub use board::{line_indices, slide_line, Board, MoveResult, Spawned};
pub use config::GameConfig;
pub use error::{BoardError, ConfigError};
pub use game_state::{GameState, MoveOutcome};
pub use rng::{RandomSource, ScriptedSource, SimpleRng};
pub use snapshot::GameSnapshot;
