//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. A 2048 move
//! is a discrete step, so there is no key-repeat handling: one press, one
//! action.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
