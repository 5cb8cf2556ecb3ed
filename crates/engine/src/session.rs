//! Turn engine - runs games against a [`Port`].
//!
//! One turn is one piece's life:
//!
//! 1. refresh the info panel, stop if the sentinel row is occupied
//! 2. draw the new piece
//! 3. frame loop: up to `FRAME_PER_ROW` polled frames, then a forced drop;
//!    a successful drop restarts the frame budget, a blocked one ends it
//! 4. lock the piece, clear full rows, score them
//! 5. promote the next forecast piece
//!
//! Save, load and new game are handled inside the frame loop. Quit ends the
//! turn at once, even when it is the key that dismisses an alert. Load and new
//! game end the turn early and hand back a replacement state, which the
//! session swaps in wholesale.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::core::{persist, GameState, SimpleRng};
use crate::settings::Settings;
use crate::types::{Action, Port, FRAME_PER_ROW};
use crate::view::View;

const MSG_GAME_OVER: &str = "GAME OVER, press any key to exit";
const MSG_PAUSED: &str = "Paused, press any key to continue";
const MSG_SAVED: &str = "Game saved, press any key to continue";
const MSG_SAVE_FAILED: &str = "Save failed, press any key to continue";
const MSG_LOADED: &str = "Game loaded, press any key to start";
const MSG_LOAD_FAILED: &str = "Load failed, press any key to continue";

/// How a turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The piece locked; play the next turn
    Continue,
    /// The sentinel row was occupied at the start of the turn
    GameOver,
    /// The player asked to leave
    Quit,
    /// A loaded or fresh game takes over
    Replace(Box<GameState>),
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    Quit,
}

/// Owns the running game and the port it is played on.
pub struct Session<P: Port> {
    port: P,
    settings: Settings,
    rng: SimpleRng,
    state: GameState,
}

impl<P: Port> Session<P> {
    /// Start from `state`.
    pub fn with_state(port: P, settings: Settings, rng: SimpleRng, state: GameState) -> Self {
        Self {
            port,
            settings,
            rng,
            state,
        }
    }

    /// Start a fresh game.
    pub fn new_game(port: P, settings: Settings, mut rng: SimpleRng) -> Self {
        let state = GameState::new(settings.width, settings.height, &mut rng);
        Self::with_state(port, settings, rng, state)
    }

    /// Resume the saved game, or start a fresh one when there is none.
    pub fn resume_or_new(port: P, settings: Settings, rng: SimpleRng) -> Self {
        match persist::load(&settings.save_path) {
            Ok(state) => {
                info!("resumed game from {}", settings.save_path.display());
                Self::with_state(port, settings, rng, state)
            }
            Err(err) => {
                debug!("no saved game ({err}), starting fresh");
                Self::new_game(port, settings, rng)
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    fn view(&self) -> View {
        View::for_state(&self.state)
    }

    /// Draw the full screen for the current game.
    pub fn init_display(&mut self) -> Result<()> {
        let view = self.view();
        view.init(&mut self.port, &self.state)
            .context("failed to draw the initial screen")
    }

    /// Play until game over or quit, swapping in loaded or new games as
    /// they are requested.
    pub fn run(&mut self) -> Result<SessionEnd> {
        self.init_display()?;
        loop {
            match self.play_turn()? {
                TurnOutcome::Continue => {}
                TurnOutcome::Replace(state) => {
                    self.state = *state;
                    self.init_display()?;
                }
                TurnOutcome::GameOver => {
                    info!(
                        "game over: score {} after {} pieces",
                        self.state.score(),
                        self.state.count()
                    );
                    return Ok(SessionEnd::GameOver);
                }
                TurnOutcome::Quit => {
                    info!("quit at score {}", self.state.score());
                    return Ok(SessionEnd::Quit);
                }
            }
        }
    }

    /// Play one piece from spawn to lock.
    pub fn play_turn(&mut self) -> Result<TurnOutcome> {
        let view = self.view();
        view.redraw_panel(&mut self.port, &self.state)?;

        if self.state.is_game_over() {
            view.alert(&mut self.port, MSG_GAME_OVER)?;
            return Ok(TurnOutcome::GameOver);
        }

        view.draw_piece(&mut self.port, self.state.current(), true, (0, 0))?;

        if let Some(outcome) = self.run_frames(view)? {
            return Ok(outcome);
        }

        let lock = self.state.settle();
        if !lock.cleared_rows.is_empty() {
            view.redraw_well(&mut self.port, &self.state)?;
        }
        debug!(
            "piece {} locked, {} rows cleared",
            self.state.count(),
            lock.lines()
        );

        self.state.spawn_next(&mut self.rng);
        Ok(TurnOutcome::Continue)
    }

    /// The frame loop. Returns an outcome when the turn ends early.
    fn run_frames(&mut self, view: View) -> Result<Option<TurnOutcome>> {
        let mut frame = 0;
        while frame <= FRAME_PER_ROW {
            let action = if frame == FRAME_PER_ROW {
                Action::Down
            } else {
                self.port.poll_action(self.state.frame_wait_ms())?
            };

            let mut moved = false;
            match action {
                Action::Left | Action::Right | Action::Rotate => {
                    moved = self.state.apply_action(action).moved;
                }
                Action::Down | Action::FastDown => {
                    let outcome = self.state.apply_action(action);
                    moved = outcome.moved;
                    frame = if outcome.landed { FRAME_PER_ROW } else { 0 };
                }
                Action::Pause => {
                    if view.alert(&mut self.port, MSG_PAUSED)? == Action::Quit {
                        return Ok(Some(TurnOutcome::Quit));
                    }
                }
                Action::Save => {
                    let message = match persist::save(&self.settings.save_path, &self.state) {
                        Ok(()) => {
                            info!("saved game to {}", self.settings.save_path.display());
                            MSG_SAVED
                        }
                        Err(err) => {
                            warn!("save failed: {err}");
                            MSG_SAVE_FAILED
                        }
                    };
                    if view.alert(&mut self.port, message)? == Action::Quit {
                        return Ok(Some(TurnOutcome::Quit));
                    }
                }
                Action::Load => match persist::load(&self.settings.save_path) {
                    Ok(state) => {
                        info!("loaded game from {}", self.settings.save_path.display());
                        if view.alert(&mut self.port, MSG_LOADED)? == Action::Quit {
                            return Ok(Some(TurnOutcome::Quit));
                        }
                        return Ok(Some(TurnOutcome::Replace(Box::new(state))));
                    }
                    Err(err) => {
                        warn!("load failed: {err}");
                        if view.alert(&mut self.port, MSG_LOAD_FAILED)? == Action::Quit {
                            return Ok(Some(TurnOutcome::Quit));
                        }
                    }
                },
                Action::NewGame => {
                    info!("new game requested");
                    let state =
                        GameState::new(self.settings.width, self.settings.height, &mut self.rng);
                    return Ok(Some(TurnOutcome::Replace(Box::new(state))));
                }
                Action::Quit => return Ok(Some(TurnOutcome::Quit)),
                Action::Empty | Action::Unrecognized => {}
            }

            if moved {
                let previous = self.state.sync_previous();
                view.move_piece(&mut self.port, &previous, self.state.current())?;
            }
            frame += 1;
        }
        Ok(None)
    }
}
