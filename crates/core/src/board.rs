//! Board module - the walled well
//!
//! The well is a flat, row-major array of [`BlockType`] that is larger than the
//! play area: one wall column on each side, wall rows below the floor and
//! `MAX_TETRIMINO_LENGTH` spare rows above `height` so a freshly spawned piece
//! always lies inside the allocation.
//!
//! Coordinates are board-relative with the origin at the bottom-left interior
//! cell and `y` growing upwards. Rows `0..height` form the play area; row
//! `height` is the sentinel row used for game-over detection.

use serde::{Deserialize, Serialize};

use crate::types::{BlockType, Coordinate, MAX_TETRIMINO_LENGTH, WALL_THICKNESS};

/// Narrowest well a piece can spawn into without touching a wall.
pub const MIN_WIDTH: Coordinate = MAX_TETRIMINO_LENGTH;

/// Largest width or height a well may have.
pub const MAX_DIMENSION: Coordinate = 256;

/// The playing field, bordered by permanent wall cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Well {
    width: Coordinate,
    height: Coordinate,
    /// Flat array of cells, row-major from the lowest wall row upwards
    cells: Vec<BlockType>,
}

impl Well {
    /// Create an empty well with its wall border in place.
    pub fn new(width: Coordinate, height: Coordinate) -> Self {
        let mut well = Self {
            width,
            height,
            cells: vec![BlockType::Empty; Self::buffer_len(width, height)],
        };

        for x in -WALL_THICKNESS..width + WALL_THICKNESS {
            if x < 0 || x >= width {
                for y in 0..well.rows_above_origin() {
                    well.set(x, y, BlockType::Wall);
                }
            }
            for y in 1..=WALL_THICKNESS {
                well.set(x, -y, BlockType::Wall);
            }
        }

        well
    }

    /// Number of cells backing a well of the given size.
    pub fn buffer_len(width: Coordinate, height: Coordinate) -> usize {
        let stride = (width + 2 * WALL_THICKNESS) as usize;
        let rows = (height + MAX_TETRIMINO_LENGTH + WALL_THICKNESS) as usize;
        stride * rows
    }

    pub fn width(&self) -> Coordinate {
        self.width
    }

    pub fn height(&self) -> Coordinate {
        self.height
    }

    /// Backing array length matches the stored dimensions.
    pub fn is_consistent(&self) -> bool {
        (MIN_WIDTH..=MAX_DIMENSION).contains(&self.width)
            && (1..=MAX_DIMENSION).contains(&self.height)
            && self.cells.len() == Self::buffer_len(self.width, self.height)
    }

    fn stride(&self) -> usize {
        (self.width + 2 * WALL_THICKNESS) as usize
    }

    fn rows_above_origin(&self) -> Coordinate {
        self.height + MAX_TETRIMINO_LENGTH
    }

    /// Flat index for a board-relative coordinate.
    #[inline(always)]
    fn index(&self, x: Coordinate, y: Coordinate) -> Option<usize> {
        if x < -WALL_THICKNESS
            || x >= self.width + WALL_THICKNESS
            || y < -WALL_THICKNESS
            || y >= self.rows_above_origin()
        {
            return None;
        }
        Some((y + WALL_THICKNESS) as usize * self.stride() + (x + WALL_THICKNESS) as usize)
    }

    /// Cell at `(x, y)`.
    ///
    /// Coordinates outside the allocation read as [`BlockType::Wall`], so
    /// collision checks never need a separate bounds test.
    pub fn cell_at(&self, x: Coordinate, y: Coordinate) -> BlockType {
        self.index(x, y)
            .and_then(|idx| self.cells.get(idx).copied())
            .unwrap_or(BlockType::Wall)
    }

    /// Whether `(x, y)` can be entered by a falling piece.
    pub fn is_free(&self, x: Coordinate, y: Coordinate) -> bool {
        self.cell_at(x, y).is_empty()
    }

    /// Overwrite `(x, y)`. Returns false outside the allocation.
    pub fn set(&mut self, x: Coordinate, y: Coordinate, block: BlockType) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = block;
                true
            }
            None => false,
        }
    }

    /// Count the non-empty interior cells of row `y`.
    pub fn count_filled(&self, y: Coordinate) -> Coordinate {
        (0..self.width)
            .filter(|&x| !self.cell_at(x, y).is_empty())
            .count() as Coordinate
    }

    /// Whether every interior cell of row `y` is occupied.
    pub fn is_row_full(&self, y: Coordinate) -> bool {
        self.count_filled(y) == self.width
    }

    /// Remove row `y`, shifting every interior row above it down by one.
    ///
    /// The topmost interior row of the allocation is left empty. Wall columns
    /// are not touched.
    pub fn clear_row(&mut self, y: Coordinate) {
        let top = self.rows_above_origin() - 1;
        if y < 0 || y > top {
            return;
        }

        let width = self.width as usize;
        for row in y..top {
            let (Some(dst), Some(src)) = (self.index(0, row), self.index(0, row + 1)) else {
                continue;
            };
            self.cells.copy_within(src..src + width, dst);
        }

        if let Some(start) = self.index(0, top) {
            for cell in &mut self.cells[start..start + width] {
                *cell = BlockType::Empty;
            }
        }
    }

    /// Clear every full row of the play area, scanning bottom to top.
    ///
    /// After a clear the same row index is tested again, since the row above
    /// has just moved into it. Returns the original row numbers, bottom first.
    pub fn clear_full_rows(&mut self) -> Vec<Coordinate> {
        let mut cleared = Vec::new();
        let mut y = 0;
        while y < self.height {
            if self.is_row_full(y) {
                cleared.push(y + cleared.len() as Coordinate);
                self.clear_row(y);
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Number of occupied interior cells across the whole allocation.
    pub fn filled_cells(&self) -> usize {
        (0..self.rows_above_origin())
            .map(|y| self.count_filled(y) as usize)
            .sum()
    }

    /// Read-only view of the backing array.
    pub fn cells(&self) -> &[BlockType] {
        &self.cells
    }
}
