//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`] and decides which
//! single action a burst of buffered keys amounts to.

pub mod map;

pub use console_tetris_types as types;

pub use map::{handle_key_event, latest_action, map_key};
