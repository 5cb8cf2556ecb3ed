//! View: maps `core::GameState` onto the port's screen.
//!
//! Board cells are two columns wide. The well is drawn with its walls, plus
//! `EXTRA_VISIBLE` rows above the play area so pieces are seen entering. The
//! info panel to the right shows key help, counters, the forecast and alerts.

use std::io;

use crate::core::{GameState, Tetrimino};
use crate::types::{
    Action, BlockType, Coordinate, Port, EXTRA_VISIBLE, FORECAST_COUNT, MAX_TETRIMINO_LENGTH,
    PANEL_MARGIN, WALL_THICKNESS, WELL_MARGIN,
};

/// Panel line used for alerts.
pub const ALERT_LINE: Coordinate = 18;
/// Longest alert text shown.
pub const ALERT_WIDTH: usize = 40;
/// Poll interval while an alert waits for a key.
pub const ALERT_POLL_MS: u32 = 100;

const SCORE_LINE: Coordinate = 10;
const COUNT_LINE: Coordinate = 9;
const FORECAST_LINE: Coordinate = 12;

const HELP: [&str; 7] = [
    "WSAD/arrows  rotate & move",
    "Space/Enter  drop",
    "Ctrl+P       pause",
    "Ctrl+W       save",
    "Ctrl+R       load",
    "Ctrl+N       new game",
    "Ctrl+C       quit",
];

/// Screen layout for a well of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    width: Coordinate,
    height: Coordinate,
}

impl View {
    pub fn new(width: Coordinate, height: Coordinate) -> Self {
        Self { width, height }
    }

    pub fn for_state(state: &GameState) -> Self {
        Self::new(state.width(), state.height())
    }

    /// Absolute screen position of board cell `(x, y)`.
    pub fn screen_position(&self, x: Coordinate, y: Coordinate) -> (Coordinate, Coordinate) {
        (
            2 * (x + WALL_THICKNESS + WELL_MARGIN),
            self.height + EXTRA_VISIBLE - 1 - y,
        )
    }

    /// Board column where the info panel starts.
    pub fn panel_x(&self) -> Coordinate {
        self.width + WALL_THICKNESS + WELL_MARGIN + PANEL_MARGIN
    }

    fn set_cursor<P: Port>(&self, port: &mut P, x: Coordinate, y: Coordinate) -> io::Result<()> {
        let (sx, sy) = self.screen_position(x, y);
        port.set_cursor(sx, sy)
    }

    fn print_at_panel<P: Port>(&self, port: &mut P, line: Coordinate, text: &str) -> io::Result<()> {
        self.set_cursor(port, self.panel_x(), line)?;
        port.print_text(text)
    }

    /// Clear the screen, print the key help and draw the whole well.
    pub fn init<P: Port>(&self, port: &mut P, state: &GameState) -> io::Result<()> {
        port.clear_screen()?;
        for (i, line) in HELP.iter().enumerate() {
            self.print_at_panel(port, (HELP.len() - 1 - i) as Coordinate, line)?;
        }
        port.flush()?;
        self.redraw_well(port, state)
    }

    /// Draw every well row, walls included. Rows above the play area are
    /// drawn empty.
    pub fn redraw_well<P: Port>(&self, port: &mut P, state: &GameState) -> io::Result<()> {
        let well = state.well();
        for y in -WALL_THICKNESS..self.height + EXTRA_VISIBLE {
            self.set_cursor(port, -WALL_THICKNESS, y)?;
            for x in -WALL_THICKNESS..self.width + WALL_THICKNESS {
                let block = if y >= self.height {
                    BlockType::Empty
                } else {
                    well.cell_at(x, y)
                };
                port.draw_block(block)?;
            }
        }
        Ok(())
    }

    /// Draw (`visible`) or erase a piece, shifted by an offset.
    ///
    /// Cells above the drawn area are skipped.
    pub fn draw_piece<P: Port>(
        &self,
        port: &mut P,
        piece: &Tetrimino,
        visible: bool,
        offset: (Coordinate, Coordinate),
    ) -> io::Result<()> {
        let block = if visible { piece.block } else { BlockType::Empty };
        for &(x, y) in &piece.minos {
            let (x, y) = (x + offset.0, y + offset.1);
            if y < self.height + EXTRA_VISIBLE {
                self.set_cursor(port, x, y)?;
                port.draw_block(block)?;
            }
        }
        Ok(())
    }

    /// Erase `previous` and draw `current`.
    pub fn move_piece<P: Port>(
        &self,
        port: &mut P,
        previous: &Tetrimino,
        current: &Tetrimino,
    ) -> io::Result<()> {
        self.draw_piece(port, previous, false, (0, 0))?;
        self.draw_piece(port, current, true, (0, 0))
    }

    /// Refresh the forecast and the counters.
    pub fn redraw_panel<P: Port>(&self, port: &mut P, state: &GameState) -> io::Result<()> {
        let slots = state.forecast().slots();
        for f in 0..FORECAST_COUNT {
            let offset = (
                self.panel_x() + f as Coordinate * (MAX_TETRIMINO_LENGTH + 1),
                FORECAST_LINE,
            );
            self.draw_piece(port, &slots[f], false, offset)?;
            self.draw_piece(port, &slots[f + 1], true, offset)?;
        }

        self.print_at_panel(port, SCORE_LINE, &format!("Score: {:<10}", state.score()))?;
        self.print_at_panel(port, COUNT_LINE, &format!("Count: {:<10}", state.count()))
    }

    /// Show `message` on the panel and block until any action arrives.
    ///
    /// Returns the action that dismissed the alert.
    pub fn alert<P: Port>(&self, port: &mut P, message: &str) -> io::Result<Action> {
        let shown: String = message.chars().take(ALERT_WIDTH).collect();
        self.print_at_panel(port, ALERT_LINE, &shown)?;
        port.flush()?;

        let dismissed = loop {
            let action = port.poll_action(ALERT_POLL_MS)?;
            if !action.is_empty() {
                break action;
            }
        };

        self.print_at_panel(port, ALERT_LINE, &" ".repeat(ALERT_WIDTH))?;
        port.flush()?;
        Ok(dismissed)
    }
}
