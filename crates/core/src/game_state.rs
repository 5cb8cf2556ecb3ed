//! Game state module - the complete, persistable game
//!
//! This module ties together the well, the falling piece and the forecast
//! queue, and implements the per-turn rules: movement, landing, locking, row
//! clearing and scoring. It does no I/O; the turn engine drives it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Well;
use crate::forecast::{ForecastQueue, FORECAST_SLOTS};
use crate::rng::SimpleRng;
use crate::scoring::line_clear_score;
use crate::tetrimino::Tetrimino;
use crate::types::{frame_wait_ms, Action, Axis, Coordinate, PieceKind, MAX_TETRIMINO_LENGTH};

/// Outcome of one movement action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The current piece changed position or orientation
    pub moved: bool,
    /// A drop found the piece resting on something; the turn is over
    pub landed: bool,
}

/// Outcome of locking the current piece.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Cleared rows by their number before the clear, bottom first
    pub cleared_rows: Vec<Coordinate>,
    /// Points awarded for the clear
    pub points: u32,
}

impl LockOutcome {
    pub fn lines(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Complete game state
///
/// `previous` only tracks what is currently drawn for the falling piece so
/// the screen can be updated by erasing old cells and drawing new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    previous: Tetrimino,
    current: Tetrimino,
    forecast: ForecastQueue,
    score: u32,
    count: u32,
    well: Well,
}

impl GameState {
    /// Create a fresh game with an empty well and a primed forecast queue.
    pub fn new(width: Coordinate, height: Coordinate, rng: &mut SimpleRng) -> Self {
        let mut state = Self {
            previous: Tetrimino::new(PieceKind::I),
            current: Tetrimino::new(PieceKind::I),
            forecast: ForecastQueue::empty(),
            score: 0,
            count: 0,
            well: Well::new(width, height),
        };
        for _ in 0..FORECAST_SLOTS {
            state.spawn_next(rng);
        }
        debug!("new {width}x{height} game");
        state
    }

    pub fn previous(&self) -> &Tetrimino {
        &self.previous
    }

    pub fn current(&self) -> &Tetrimino {
        &self.current
    }

    pub fn forecast(&self) -> &ForecastQueue {
        &self.forecast
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pieces locked so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn width(&self) -> Coordinate {
        self.well.width()
    }

    pub fn height(&self) -> Coordinate {
        self.well.height()
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    /// Direct access to the well, for setting up positions in tests and tools.
    pub fn well_mut(&mut self) -> &mut Well {
        &mut self.well
    }

    /// Replace the current piece without any collision check.
    pub fn set_current(&mut self, piece: Tetrimino) {
        self.current = piece;
    }

    /// Input window for the next frame in milliseconds.
    pub fn frame_wait_ms(&self) -> u32 {
        frame_wait_ms(self.score)
    }

    /// Where a piece anchored at the origin enters the well.
    pub fn spawn_origin(&self) -> (Coordinate, Coordinate) {
        ((self.width() - MAX_TETRIMINO_LENGTH) / 2, self.height())
    }

    /// Promote the next forecast piece into play at the spawn position.
    ///
    /// Spawning never fails; a blocked spawn shows up in the sentinel row and
    /// is reported by [`GameState::is_game_over`] at the start of the turn.
    pub fn spawn_next(&mut self, rng: &mut SimpleRng) {
        let (x, y) = self.spawn_origin();
        let mut piece = self.forecast.advance(rng);
        piece.shift(Axis::X, x, None);
        piece.shift(Axis::Y, y, None);
        self.current = piece;
        self.previous = piece;
    }

    /// Whether anything sits in the sentinel row just above the play area.
    pub fn is_game_over(&self) -> bool {
        self.well.count_filled(self.height()) > 0
    }

    pub fn try_shift(&mut self, axis: Axis, offset: Coordinate) -> bool {
        self.current.shift(axis, offset, Some(&self.well))
    }

    pub fn try_rotate(&mut self) -> bool {
        self.current.rotate(Some(&self.well))
    }

    /// Drop the current piece as far as it goes. Returns the rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.try_shift(Axis::Y, -1) {
            rows += 1;
        }
        rows
    }

    /// Apply a movement action to the current piece.
    ///
    /// Non-movement actions are ignored and report no change.
    pub fn apply_action(&mut self, action: Action) -> MoveOutcome {
        match action {
            Action::Left => MoveOutcome {
                moved: self.try_shift(Axis::X, -1),
                landed: false,
            },
            Action::Right => MoveOutcome {
                moved: self.try_shift(Axis::X, 1),
                landed: false,
            },
            Action::Rotate => MoveOutcome {
                moved: self.try_rotate(),
                landed: false,
            },
            Action::Down => {
                let moved = self.try_shift(Axis::Y, -1);
                MoveOutcome {
                    moved,
                    landed: !moved,
                }
            }
            Action::FastDown => {
                let moved = self.hard_drop() > 0;
                MoveOutcome {
                    moved,
                    landed: !moved,
                }
            }
            _ => MoveOutcome::default(),
        }
    }

    /// Mark the current piece as drawn and return what was drawn before.
    pub fn sync_previous(&mut self) -> Tetrimino {
        std::mem::replace(&mut self.previous, self.current)
    }

    /// Write the current piece into the well permanently.
    pub fn lock_current(&mut self) {
        self.current.lock_into(&mut self.well);
    }

    /// Clear every full row and award the triangular line bonus.
    pub fn clear_full_rows(&mut self) -> LockOutcome {
        let cleared_rows = self.well.clear_full_rows();
        let points = line_clear_score(cleared_rows.len() as u32);
        self.score = self.score.saturating_add(points);
        if !cleared_rows.is_empty() {
            debug!("cleared rows {cleared_rows:?} for {points} points");
        }
        LockOutcome {
            cleared_rows,
            points,
        }
    }

    /// End of turn: lock, clear rows and count the piece.
    pub fn settle(&mut self) -> LockOutcome {
        self.lock_current();
        let outcome = self.clear_full_rows();
        self.count = self.count.saturating_add(1);
        outcome
    }

    /// Whether a deserialized state is safe to play.
    pub fn is_consistent(&self) -> bool {
        let extent = 0..MAX_TETRIMINO_LENGTH;
        let anchored = |piece: &Tetrimino| {
            piece
                .minos
                .iter()
                .all(|(x, y)| extent.contains(x) && extent.contains(y))
        };
        self.well.is_consistent()
            && self.current.fits(&self.well)
            && self.previous.fits(&self.well)
            && self.forecast.slots().iter().all(anchored)
    }
}
