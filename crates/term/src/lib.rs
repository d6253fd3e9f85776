//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play: the board is drawn into a
//! framebuffer of styled cells, which is then diffed against the previous frame
//! and flushed through crossterm.
//!
//! Goals:
//! - Keep `core` free of any terminal concern
//! - Make rendering testable without a terminal ([`GameView`] is pure)
//! - Send only changed cells on each frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, ChangedRuns, Run, TerminalRenderer};
