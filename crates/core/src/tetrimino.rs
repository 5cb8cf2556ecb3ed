//! Tetrimino module - piece shapes, translation and rotation
//!
//! A piece is four absolute cells plus the block type it paints. There are no
//! per-shape rotation tables: rotation is a quarter turn inside the piece's
//! bounding box, followed by a short kick search towards the left and the
//! floor.
//!
//! Every move builds a candidate first and commits it only when all four
//! cells are free, so a rejected move never leaves the piece half-moved.

use serde::{Deserialize, Serialize};

use crate::board::Well;
use crate::types::{Axis, BlockType, Coordinate, PieceKind, BLOCKS_PER_TETRIMINO};

/// One cell of a piece, `(x, y)` in board coordinates.
pub type Mino = (Coordinate, Coordinate);

/// Cells of a piece.
pub type Minos = [Mino; BLOCKS_PER_TETRIMINO];

/// Default orientation of each shape, anchored at the origin.
pub fn template(kind: PieceKind) -> Minos {
    match kind {
        PieceKind::I => [(0, 3), (0, 2), (0, 1), (0, 0)],
        PieceKind::O => [(0, 1), (1, 1), (1, 0), (0, 0)],
        PieceKind::T => [(0, 1), (1, 1), (2, 1), (1, 0)],
        PieceKind::J => [(1, 2), (1, 1), (1, 0), (0, 0)],
        PieceKind::L => [(0, 2), (0, 1), (0, 0), (1, 0)],
        PieceKind::S => [(2, 1), (1, 1), (1, 0), (0, 0)],
        PieceKind::Z => [(0, 1), (1, 1), (1, 0), (2, 0)],
    }
}

/// Most corrective shifts tried on each axis after a rotation.
const KICK_ATTEMPTS: Coordinate = 4;

/// A falling (or forecast) piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetrimino {
    pub block: BlockType,
    pub minos: Minos,
}

impl Tetrimino {
    /// Instantiate `kind` in its default orientation at the origin.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            block: BlockType::Piece(kind),
            minos: template(kind),
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self.block {
            BlockType::Piece(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether all four cells are free in `well`.
    pub fn fits(&self, well: &Well) -> bool {
        self.minos.iter().all(|&(x, y)| well.is_free(x, y))
    }

    /// Copy of this piece moved by `offset` along `axis`, without any checks.
    pub fn translated(&self, axis: Axis, offset: Coordinate) -> Self {
        let mut moved = *self;
        for (x, y) in &mut moved.minos {
            match axis {
                Axis::X => *x += offset,
                Axis::Y => *y += offset,
            }
        }
        moved
    }

    /// Move by `offset` along `axis`.
    ///
    /// With a well, the move is rejected as a whole when any destination cell
    /// is occupied and the piece stays where it was. Without a well (pure
    /// geometry, e.g. positioning a new piece) it always succeeds.
    pub fn shift(&mut self, axis: Axis, offset: Coordinate, well: Option<&Well>) -> bool {
        let candidate = self.translated(axis, offset);
        if let Some(well) = well {
            if !candidate.fits(well) {
                return false;
            }
        }
        *self = candidate;
        true
    }

    /// `(left, bottom, top)` of the bounding box.
    pub fn bounds(&self) -> (Coordinate, Coordinate, Coordinate) {
        let (x0, y0) = self.minos[0];
        self.minos[1..]
            .iter()
            .fold((x0, y0, y0), |(left, bottom, top), &(x, y)| {
                (left.min(x), bottom.min(y), top.max(y))
            })
    }

    /// Quarter turn inside the bounding box, keeping its bottom-left corner.
    pub fn rotated(&self) -> Self {
        let (left, bottom, top) = self.bounds();
        let mut turned = *self;
        for (cell, &(x, y)) in turned.minos.iter_mut().zip(self.minos.iter()) {
            *cell = (left + (top - y), bottom + (x - left));
        }
        turned
    }

    /// Rotate a quarter turn.
    ///
    /// If the turned piece collides, it is kicked: for `i` in `0..4` the
    /// candidate is tried `i` columns to the left, then `i` rows lower, and
    /// the first fit wins. Without a well the rotation always succeeds.
    pub fn rotate(&mut self, well: Option<&Well>) -> bool {
        let turned = self.rotated();
        let Some(well) = well else {
            *self = turned;
            return true;
        };

        for i in 0..KICK_ATTEMPTS {
            for axis in [Axis::X, Axis::Y] {
                let mut candidate = turned;
                if candidate.shift(axis, -i, Some(well)) {
                    *self = candidate;
                    return true;
                }
            }
        }
        false
    }

    /// Copy the piece's cells into `well` with its block type.
    pub fn lock_into(&self, well: &mut Well) {
        for &(x, y) in &self.minos {
            well.set(x, y, self.block);
        }
    }
}
