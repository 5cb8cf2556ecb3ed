//! Scoring module
//!
//! Clearing `k` rows with a single lock scores the triangular number
//! `k(k+1)/2`, so multi-row clears are worth more than the same rows
//! cleared one at a time.

/// Points for clearing `rows` rows at once.
///
/// ```
/// use console_tetris_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(4), 10);
/// ```
pub fn line_clear_score(rows: u32) -> u32 {
    rows * (rows + 1) / 2
}
