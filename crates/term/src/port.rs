//! TerminalPort: the crossterm implementation of [`Port`].
//!
//! Drawing commands are queued into a byte buffer and written to stdout in
//! one go on [`Port::flush`], which also happens before every input wait.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::input::latest_action;
use crate::types::{Action, BlockType, Coordinate, Port};

const EMPTY_GLYPH: &str = "  ";
const WALL_GLYPH: &str = "囗";
const PIECE_GLYPH: &str = "田";

/// Colours cycled through by piece block codes.
const PIECE_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

pub struct TerminalPort {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalPort {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    fn apply_plain_style(&mut self) -> io::Result<()> {
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(SetForegroundColor(Color::White))?;
        self.buf.queue(SetBackgroundColor(Color::Black))?;
        Ok(())
    }

    fn drain_keys(&mut self) -> io::Result<Action> {
        let mut keys = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                keys.push(key);
            }
        }
        Ok(latest_action(keys))
    }
}

impl Default for TerminalPort {
    fn default() -> Self {
        Self::new()
    }
}

/// Foreground colour for a block.
pub fn block_color(block: BlockType) -> Color {
    match block {
        BlockType::Empty | BlockType::Wall => Color::White,
        BlockType::Piece(_) => PIECE_COLORS[block.code() as usize % PIECE_COLORS.len()],
    }
}

fn screen_coord(value: Coordinate) -> u16 {
    u16::try_from(value).unwrap_or(0)
}

impl Port for TerminalPort {
    fn prepare(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.apply_plain_style()?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn set_cursor(&mut self, x: Coordinate, y: Coordinate) -> io::Result<()> {
        self.buf.queue(cursor::MoveTo(screen_coord(x), screen_coord(y)))?;
        Ok(())
    }

    fn draw_block(&mut self, block: BlockType) -> io::Result<()> {
        self.apply_plain_style()?;
        match block {
            BlockType::Empty => {
                self.buf.queue(Print(EMPTY_GLYPH))?;
            }
            BlockType::Wall => {
                self.buf.queue(Print(WALL_GLYPH))?;
            }
            BlockType::Piece(_) => {
                self.buf.queue(SetAttribute(Attribute::Bold))?;
                self.buf.queue(SetForegroundColor(block_color(block)))?;
                self.buf.queue(Print(PIECE_GLYPH))?;
            }
        }
        Ok(())
    }

    fn print_text(&mut self, text: &str) -> io::Result<()> {
        self.apply_plain_style()?;
        self.buf.queue(Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        self.buf.clear();
        Ok(())
    }

    fn poll_action(&mut self, wait_ms: u32) -> io::Result<Action> {
        self.flush()?;
        thread::sleep(Duration::from_millis(u64::from(wait_ms)));
        self.drain_keys()
    }
}

/// Best-effort terminal restore for signal and panic hooks.
///
/// Touches no game state and ignores every error.
pub fn restore_terminal() {
    let mut out = io::stdout();
    let _ = out.queue(ResetColor);
    let _ = out.queue(SetAttribute(Attribute::Reset));
    let _ = out.queue(terminal::EnableLineWrap);
    let _ = out.queue(cursor::Show);
    let _ = out.queue(terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();
}
