//! Forecast queue - lookahead of upcoming pieces
//!
//! Slot 0 always mirrors the piece in play; slots `1..=FORECAST_COUNT` are the
//! real forecast shown to the player. Forecast pieces stay anchored at the
//! origin so the info panel can draw them with a plain offset.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::tetrimino::Tetrimino;
use crate::types::{PieceKind, FORECAST_COUNT};

/// Number of slots, including the mirror of the current piece.
pub const FORECAST_SLOTS: usize = FORECAST_COUNT + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastQueue {
    slots: [Tetrimino; FORECAST_SLOTS],
}

impl ForecastQueue {
    /// Queue of placeholder pieces; prime it with `FORECAST_SLOTS` calls to
    /// [`ForecastQueue::advance`] before use.
    pub fn empty() -> Self {
        Self {
            slots: [Tetrimino::new(PieceKind::I); FORECAST_SLOTS],
        }
    }

    /// Shift every slot down by one and append a fresh random piece.
    ///
    /// Returns the new slot 0, the piece that is about to enter play.
    pub fn advance(&mut self, rng: &mut SimpleRng) -> Tetrimino {
        self.slots.copy_within(1.., 0);
        self.slots[FORECAST_SLOTS - 1] = random_piece(rng);
        self.slots[0]
    }

    pub fn slots(&self) -> &[Tetrimino; FORECAST_SLOTS] {
        &self.slots
    }

    /// The pieces shown to the player, nearest first.
    pub fn upcoming(&self) -> &[Tetrimino] {
        &self.slots[1..]
    }
}

/// A uniformly chosen shape in a uniformly chosen orientation.
pub fn random_piece(rng: &mut SimpleRng) -> Tetrimino {
    let mut piece = Tetrimino::new(rng.next_kind());
    for _ in 0..rng.next_turns() {
        piece.rotate(None);
    }
    piece
}
