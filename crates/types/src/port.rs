//! Display/Input port.
//!
//! The turn engine talks to the outside world only through this trait. The
//! terminal implementation lives in `console-tetris-term`; the engine ships a
//! scripted implementation for tests.

use std::io;

use crate::{Action, BlockType, Coordinate};

/// Narrow drawing and input surface consumed by the turn engine.
///
/// Screen coordinates are absolute: `(0, 0)` is the top-left corner and one
/// unit is one character column. Drawing calls may be buffered until
/// [`Port::flush`] or [`Port::poll_action`].
pub trait Port {
    /// Put the environment into game mode (raw input, hidden cursor).
    fn prepare(&mut self) -> io::Result<()>;

    /// Undo [`Port::prepare`].
    fn restore(&mut self) -> io::Result<()>;

    /// Blank the whole screen.
    fn clear_screen(&mut self) -> io::Result<()>;

    /// Position subsequent draws.
    fn set_cursor(&mut self, x: Coordinate, y: Coordinate) -> io::Result<()>;

    /// Draw one two-column cell at the cursor and advance it.
    fn draw_block(&mut self, block: BlockType) -> io::Result<()>;

    /// Print plain text at the cursor.
    fn print_text(&mut self, text: &str) -> io::Result<()>;

    /// Push buffered output to the screen.
    fn flush(&mut self) -> io::Result<()>;

    /// Wait up to `wait_ms` and return the most recent meaningful action,
    /// or [`Action::Empty`] when nothing arrived.
    fn poll_action(&mut self, wait_ms: u32) -> io::Result<Action>;
}

impl<P: Port + ?Sized> Port for &mut P {
    fn prepare(&mut self) -> io::Result<()> {
        (**self).prepare()
    }

    fn restore(&mut self) -> io::Result<()> {
        (**self).restore()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        (**self).clear_screen()
    }

    fn set_cursor(&mut self, x: Coordinate, y: Coordinate) -> io::Result<()> {
        (**self).set_cursor(x, y)
    }

    fn draw_block(&mut self, block: BlockType) -> io::Result<()> {
        (**self).draw_block(block)
    }

    fn print_text(&mut self, text: &str) -> io::Result<()> {
        (**self).print_text(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn poll_action(&mut self, wait_ms: u32) -> io::Result<Action> {
        (**self).poll_action(wait_ms)
    }
}
