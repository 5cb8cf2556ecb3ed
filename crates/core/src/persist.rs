//! Save/restore of a complete [`GameState`].
//!
//! File layout:
//!
//! | bytes | content |
//! |-------|---------|
//! | 4 | payload length, `u32` little-endian |
//! | n | `bincode` encoding of the `GameState` |
//!
//! The payload stores the well's dimensions ahead of its cells, so a reader
//! knows the board size before it reaches the board contents.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::game_state::GameState;

/// Largest payload accepted when loading.
const MAX_PAYLOAD_LEN: u32 = 1 << 20;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("save file is corrupt: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// Encode `state` into `writer`.
pub fn write_snapshot<W: Write>(mut writer: W, state: &GameState) -> Result<()> {
    let payload = bincode::serialize(state)?;
    let len = u32::try_from(payload.len())
        .map_err(|_| PersistError::Corrupt(format!("payload of {} bytes", payload.len())))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Decode a state from `reader`. A short read is an error.
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<GameState> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes);
    if len > MAX_PAYLOAD_LEN {
        return Err(PersistError::Corrupt(format!("payload length {len}")));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload)?;

    let state: GameState = bincode::deserialize(&payload)?;
    if !state.is_consistent() {
        return Err(PersistError::Corrupt(
            "dimensions or pieces out of range".to_string(),
        ));
    }
    Ok(state)
}

/// Write `state` to the file at `path`, replacing it.
pub fn save(path: impl AsRef<Path>, state: &GameState) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_snapshot(BufWriter::new(file), state)?;
    debug!("saved game to {}", path.display());
    Ok(())
}

/// Read a state from the file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<GameState> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let state = read_snapshot(BufReader::new(file))?;
    debug!("loaded game from {}", path.display());
    Ok(state)
}
