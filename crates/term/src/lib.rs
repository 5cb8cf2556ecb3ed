//! Terminal port.
//!
//! Implements the engine's display/input [`Port`](console_tetris_types::Port)
//! on top of crossterm: raw mode, an alternate screen, coloured two-column
//! blocks and timed key polling.

pub mod port;

pub use console_tetris_input as input;
pub use console_tetris_types as types;

pub use port::{block_color, restore_terminal, TerminalPort};
