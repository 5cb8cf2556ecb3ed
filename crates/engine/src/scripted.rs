//! Scripted port for headless runs and tests.
//!
//! Actions are replayed from a fixed script; everything drawn is kept in an
//! in-memory screen that tests can inspect.

use std::collections::{HashMap, VecDeque};
use std::io;

use crate::types::{Action, BlockType, Coordinate, Port};

#[derive(Debug, Clone)]
pub struct ScriptedPort {
    script: VecDeque<Action>,
    /// Returned once the script has run out
    exhausted: Action,
    cursor: (Coordinate, Coordinate),
    screen: HashMap<(Coordinate, Coordinate), BlockType>,
    texts: Vec<String>,
    polls: Vec<u32>,
    clears: usize,
}

impl ScriptedPort {
    /// Replay `script`, then answer [`Action::Quit`] forever.
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: script.into_iter().collect(),
            exhausted: Action::Quit,
            cursor: (0, 0),
            screen: HashMap::new(),
            texts: Vec::new(),
            polls: Vec::new(),
            clears: 0,
        }
    }

    /// Action answered once the script has run out.
    pub fn when_exhausted(mut self, action: Action) -> Self {
        self.exhausted = action;
        self
    }

    /// Block last drawn at an absolute screen position.
    pub fn block_at(&self, x: Coordinate, y: Coordinate) -> BlockType {
        self.screen.get(&(x, y)).copied().unwrap_or_default()
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }

    /// Wait times of every poll so far.
    pub fn polls(&self) -> &[u32] {
        &self.polls
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Port for ScriptedPort {
    fn prepare(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.screen.clear();
        self.clears += 1;
        Ok(())
    }

    fn set_cursor(&mut self, x: Coordinate, y: Coordinate) -> io::Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn draw_block(&mut self, block: BlockType) -> io::Result<()> {
        self.screen.insert(self.cursor, block);
        self.cursor.0 += 2;
        Ok(())
    }

    fn print_text(&mut self, text: &str) -> io::Result<()> {
        self.texts.push(text.to_string());
        self.cursor.0 += text.chars().count() as Coordinate;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn poll_action(&mut self, wait_ms: u32) -> io::Result<Action> {
        self.polls.push(wait_ms);
        Ok(self.script.pop_front().unwrap_or(self.exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_script_then_answers_fallback() {
        let mut port = ScriptedPort::new([Action::Left, Action::Empty]);
        assert_eq!(port.poll_action(10).unwrap(), Action::Left);
        assert_eq!(port.poll_action(20).unwrap(), Action::Empty);
        assert_eq!(port.poll_action(30).unwrap(), Action::Quit);
        assert_eq!(port.polls(), &[10, 20, 30]);
    }

    #[test]
    fn draw_advances_two_columns() {
        let mut port = ScriptedPort::new([]);
        port.set_cursor(4, 1).unwrap();
        port.draw_block(BlockType::Wall).unwrap();
        port.draw_block(BlockType::Empty).unwrap();
        assert_eq!(port.block_at(4, 1), BlockType::Wall);
        assert_eq!(port.block_at(6, 1), BlockType::Empty);
    }
}
