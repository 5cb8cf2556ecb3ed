//! Console Tetris runner (default binary).
//!
//! Resumes the saved game (or starts a new one), plays until game over or
//! quit and always tries to restore the terminal on the way out, including
//! on termination signals and panics.

use std::env;
use std::fs::File;
use std::panic;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;

use console_tetris::core::SimpleRng;
use console_tetris::engine::{Session, Settings};
use console_tetris::term::{restore_terminal, TerminalPort};
use console_tetris::types::Port;

/// Environment variable naming the log file; logging is off when unset.
const LOG_PATH_ENV: &str = "CONSOLE_TETRIS_LOG";

fn main() -> Result<()> {
    init_logging();
    install_exit_hooks()?;

    let mut term = TerminalPort::new();
    if let Err(err) = term.prepare() {
        restore_terminal();
        return Err(err).context("failed to prepare the terminal");
    }

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.restore();
    result
}

fn run(term: &mut TerminalPort) -> Result<()> {
    let settings = Settings::from_env();
    let rng = SimpleRng::new(clock_seed());
    let mut session = Session::resume_or_new(term, settings, rng);
    let end = session.run()?;
    info!("session ended: {end:?}");
    Ok(())
}

/// Route `log` output into the file named by `CONSOLE_TETRIS_LOG`.
///
/// Stdout belongs to the game screen, so without a log file nothing is logged.
fn init_logging() {
    let Some(path) = env::var_os(LOG_PATH_ENV) else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();
}

fn install_exit_hooks() -> Result<()> {
    ctrlc::set_handler(|| {
        restore_terminal();
        process::exit(0);
    })
    .context("failed to install the termination handler")?;

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
