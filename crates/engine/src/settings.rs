//! Runtime settings.

use std::env;
use std::path::PathBuf;

use crate::types::{Coordinate, DEFAULT_HEIGHT, DEFAULT_WIDTH, SAVE_FILE};

/// Environment variable overriding the save file location.
pub const SAVE_PATH_ENV: &str = "CONSOLE_TETRIS_SAVE";

/// Board size and save location for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Width of a newly created well
    pub width: Coordinate,
    /// Height of a newly created well
    pub height: Coordinate,
    /// Snapshot file used by save and load
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            save_path: PathBuf::from(SAVE_FILE),
        }
    }
}

impl Settings {
    /// Defaults, with the save path taken from `CONSOLE_TETRIS_SAVE` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(path) = env::var_os(SAVE_PATH_ENV).filter(|p| !p.is_empty()) {
            settings.save_path = PathBuf::from(path);
        }
        settings
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }
}
