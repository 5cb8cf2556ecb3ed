//! Turn engine.
//!
//! Drives a [`core::GameState`](console_tetris_core::GameState) through its
//! turns against any [`Port`](console_tetris_types::Port): polling actions,
//! applying them, redrawing what changed and handling save, load and new game.
//!
//! The engine never branches on platform; the terminal implementation and the
//! scripted test implementation are interchangeable.

pub mod scripted;
pub mod session;
pub mod settings;
pub mod view;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use scripted::ScriptedPort;
pub use session::{Session, SessionEnd, TurnOutcome};
pub use settings::Settings;
pub use view::View;
