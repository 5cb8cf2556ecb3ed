//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the data that a save file holds.
//! Apart from reading and writing snapshot files it does no I/O: drawing and
//! input belong to the turn engine and the terminal port.
//!
//! # Module Structure
//!
//! - [`board`]: the walled well, collision queries and row clearing
//! - [`tetrimino`]: piece templates, atomic shifts, bounding-box rotation with kicks
//! - [`rng`]: seeded uniform piece and orientation picks
//! - [`forecast`]: lookahead queue of upcoming pieces
//! - [`game_state`]: the complete game and its per-turn rules
//! - [`scoring`]: triangular line-clear bonus
//! - [`persist`]: length-prefixed binary snapshots
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{GameState, SimpleRng};
//! use console_tetris_types::Action;
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut game = GameState::new(10, 20, &mut rng);
//!
//! game.apply_action(Action::Right);
//! game.apply_action(Action::Rotate);
//! let drop = game.apply_action(Action::FastDown);
//! assert!(drop.moved);
//!
//! game.settle();
//! game.spawn_next(&mut rng);
//! assert_eq!(game.count(), 1);
//! ```

pub mod board;
pub mod forecast;
pub mod game_state;
pub mod persist;
pub mod rng;
pub mod scoring;
pub mod tetrimino;

pub use console_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Well;
pub use forecast::ForecastQueue;
pub use game_state::{GameState, LockOutcome, MoveOutcome};
pub use persist::PersistError;
pub use rng::SimpleRng;
pub use tetrimino::Tetrimino;
