//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Apart from `serde` derives for persistence, everything here is plain data,
//! usable from the simulation core, the turn engine and the terminal port alike.
//!
//! # Coordinates
//!
//! Board coordinates are signed and board-relative:
//!
//! - Origin `(0, 0)` is the bottom-left interior cell of the well
//! - `x` grows to the right, `y` grows upwards
//! - Walls sit at `x == -1`, `x == width` and `y == -1`
//! - New pieces spawn at `y == height`, above the visible play area
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_PER_ROW` | 15 | Input frames before gravity forces a row drop |
//! | `FORECAST_COUNT` | 2 | Upcoming pieces shown in the info panel |
//! | `WALL_THICKNESS` | 1 | Wall cells on the left, right and bottom |
//! | `EXTRA_VISIBLE` | 2 | Rows above `height` that are still drawn |
//! | `MAX_TETRIMINO_LENGTH` | 4 | Largest extent of any piece |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{Action, BlockType, PieceKind};
//!
//! let block = BlockType::Piece(PieceKind::T);
//! assert_eq!(block.code(), 4);
//! assert_eq!(BlockType::from_code(4), Some(block));
//! assert!(!block.is_empty());
//!
//! assert!(Action::Empty.is_empty());
//! assert!(!Action::Unrecognized.is_empty());
//! ```

use serde::{Deserialize, Serialize};

pub mod port;

pub use port::Port;

/// Signed board coordinate.
pub type Coordinate = i16;

/// Number of blocks in every tetrimino.
pub const BLOCKS_PER_TETRIMINO: usize = 4;

/// Longest extent of any tetrimino along either axis.
pub const MAX_TETRIMINO_LENGTH: Coordinate = BLOCKS_PER_TETRIMINO as Coordinate;

/// Input frames per row; the frame after the last one is a forced gravity drop.
pub const FRAME_PER_ROW: u32 = 15;

/// Upcoming pieces shown in the info panel.
pub const FORECAST_COUNT: usize = 2;

/// Rows above the well's top that are still drawn.
pub const EXTRA_VISIBLE: Coordinate = 2;

/// Wall thickness on the left, right and bottom of the well.
pub const WALL_THICKNESS: Coordinate = 1;

/// Blank columns between the screen edge and the left wall.
pub const WELL_MARGIN: Coordinate = 1;

/// Blank columns between the right wall and the info panel.
pub const PANEL_MARGIN: Coordinate = 2;

/// Default well width (10 columns)
pub const DEFAULT_WIDTH: Coordinate = 10;

/// Default well height (20 rows)
pub const DEFAULT_HEIGHT: Coordinate = 20;

/// Default save file, relative to the working directory.
pub const SAVE_FILE: &str = "ConsoleTetris.dat";

/// Input window for one frame in milliseconds.
///
/// The window shrinks as the score grows, which is what speeds the game up.
///
/// ```
/// use console_tetris_types::frame_wait_ms;
///
/// assert_eq!(frame_wait_ms(0), 70);
/// assert_eq!(frame_wait_ms(100), 50);
/// assert_eq!(frame_wait_ms(1_000_000), 30);
/// ```
pub fn frame_wait_ms(score: u32) -> u32 {
    4000 / score.saturating_add(100) + 30
}

/// The seven tetrimino shapes, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in template order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Content of one well cell.
///
/// Anything other than [`BlockType::Empty`] is impassable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Empty,
    Wall,
    Piece(PieceKind),
}

impl BlockType {
    /// Numeric code of the first piece variant.
    pub const NORMAL_MIN: u8 = 2;

    /// Stable numeric code: `Empty = 0`, `Wall = 1`, pieces from [`BlockType::NORMAL_MIN`].
    pub fn code(self) -> u8 {
        match self {
            BlockType::Empty => 0,
            BlockType::Wall => 1,
            BlockType::Piece(kind) => Self::NORMAL_MIN + kind.index() as u8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BlockType::Empty),
            1 => Some(BlockType::Wall),
            c => PieceKind::from_index((c - Self::NORMAL_MIN) as usize).map(BlockType::Piece),
        }
    }

    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }
}

/// Axis a tetrimino can be shifted along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Player actions delivered by the input side of the [`Port`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Nothing arrived within the wait window
    #[default]
    Empty,
    /// Shift one column left
    Left,
    /// Shift one column right
    Right,
    /// Drop one row; landing ends the turn
    Down,
    /// Drop until blocked
    FastDown,
    /// Quarter turn with wall kick
    Rotate,
    /// Block until any key
    Pause,
    /// Write the snapshot file
    Save,
    /// Replace the running game with the snapshot file
    Load,
    /// Replace the running game with a fresh one
    NewGame,
    /// Leave the game
    Quit,
    /// A key arrived but maps to nothing
    Unrecognized,
}

impl Action {
    pub fn is_empty(self) -> bool {
        self == Action::Empty
    }
}
