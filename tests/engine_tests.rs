//! End-to-end tests: whole turns driven through a scripted port

use console_tetris::core::{persist, GameState, SimpleRng, Tetrimino};
use console_tetris::engine::view::ALERT_POLL_MS;
use console_tetris::engine::{ScriptedPort, Session, SessionEnd, Settings, TurnOutcome, View};
use console_tetris::types::{Action, Axis, BlockType, PieceKind, FRAME_PER_ROW};
use tempfile::TempDir;

const FILL: BlockType = BlockType::Piece(PieceKind::S);
const I_BLOCK: BlockType = BlockType::Piece(PieceKind::I);

fn settings(dir: &TempDir) -> Settings {
    Settings::default().with_save_path(dir.path().join("ConsoleTetris.dat"))
}

/// Fresh 10x20 game with a vertical I at the spawn position.
fn game_with_i(seed: u32) -> (GameState, SimpleRng) {
    let mut rng = SimpleRng::new(seed);
    let mut state = GameState::new(10, 20, &mut rng);
    let (x, y) = state.spawn_origin();
    let mut piece = Tetrimino::new(PieceKind::I);
    piece.shift(Axis::X, x, None);
    piece.shift(Axis::Y, y, None);
    state.set_current(piece);
    state.sync_previous();
    (state, rng)
}

fn scripted_session(
    script: impl IntoIterator<Item = Action>,
    dir: &TempDir,
    seed: u32,
) -> Session<ScriptedPort> {
    let (state, rng) = game_with_i(seed);
    Session::with_state(ScriptedPort::new(script), settings(dir), rng, state)
}

fn screen_block(session: &Session<ScriptedPort>, x: i16, y: i16) -> BlockType {
    let (sx, sy) = View::for_state(session.state()).screen_position(x, y);
    session.port().block_at(sx, sy)
}

#[test]
fn test_fast_down_locks_i_on_the_floor() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([Action::FastDown, Action::FastDown], &dir, 1);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Continue));
    // The first drop reaches the floor, the second finds it resting and ends the turn
    assert_eq!(session.port().polls().len(), 2);
    assert_eq!(session.state().count(), 1);
    for y in 0..4 {
        assert_eq!(session.state().well().cell_at(3, y), I_BLOCK);
    }
    assert_eq!(screen_block(&session, 3, 0), I_BLOCK);
    assert_eq!(screen_block(&session, 3, 20), BlockType::Empty);
}

#[test]
fn test_gravity_drops_one_row_per_frame_budget() {
    let dir = tempfile::tempdir().unwrap();
    let (state, rng) = game_with_i(2);
    let port = ScriptedPort::new([]).when_exhausted(Action::Empty);
    let mut session = Session::with_state(port, settings(&dir), rng, state);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Continue));
    // A full first budget, then one budget per row fallen from 20 to 0
    let budget = FRAME_PER_ROW as usize;
    assert_eq!(session.port().polls().len(), budget + 20 * (budget - 1));
    assert!(session.port().polls().iter().all(|&ms| ms == 70));
    assert_eq!(session.state().well().cell_at(3, 0), I_BLOCK);
}

#[test]
fn test_single_row_clear_scores_and_redraws() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, rng) = game_with_i(3);
    for x in (0..10).filter(|&x| x != 3) {
        state.well_mut().set(x, 0, FILL);
    }
    let port = ScriptedPort::new([Action::FastDown, Action::FastDown]);
    let mut session = Session::with_state(port, settings(&dir), rng, state);

    let end = session.run().unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(session.state().score(), 1);
    assert_eq!(session.state().well().count_filled(0), 1);
    assert_eq!(session.state().well().count_filled(3), 0);
    assert_eq!(screen_block(&session, 0, 0), BlockType::Empty);
    assert_eq!(screen_block(&session, 3, 0), I_BLOCK);
    assert!(session.port().printed("Score: 1"));
}

#[test]
fn test_game_over_reported_before_any_frame() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, rng) = game_with_i(4);
    state.well_mut().set(0, 20, FILL);
    let port = ScriptedPort::new([Action::Empty, Action::Empty, Action::Left]);
    let mut session = Session::with_state(port, settings(&dir), rng, state);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::GameOver));
    assert!(session.port().printed("GAME OVER"));
    // Only alert polls, no frame polls, and the piece was never drawn
    assert_eq!(session.port().polls(), &[ALERT_POLL_MS; 3]);
    assert_eq!(screen_block(&session, 3, 20), BlockType::Empty);
    assert_eq!(session.state().count(), 0);
}

#[test]
fn test_run_ends_with_game_over() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, rng) = game_with_i(5);
    state.well_mut().set(9, 20, FILL);
    let mut session = Session::with_state(ScriptedPort::new([]), settings(&dir), rng, state);

    assert_eq!(session.run().unwrap(), SessionEnd::GameOver);
}

#[test]
fn test_moves_redraw_differentially() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([Action::Right], &dir, 6);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Quit));
    assert_eq!(screen_block(&session, 3, 20), BlockType::Empty);
    assert_eq!(screen_block(&session, 4, 20), I_BLOCK);
    assert_eq!(screen_block(&session, 4, 21), I_BLOCK);
    assert_eq!(session.state().previous(), session.state().current());
}

#[test]
fn test_pause_swallows_the_dismissing_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([Action::Pause, Action::Empty, Action::Right], &dir, 7);
    let before = *session.state().current();

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Quit));
    assert!(session.port().printed("Paused"));
    assert_eq!(*session.state().current(), before);
    assert_eq!(session.port().polls(), &[70, ALERT_POLL_MS, ALERT_POLL_MS, 70]);
}

#[test]
fn test_save_writes_current_game() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([Action::Save, Action::Unrecognized], &dir, 8);

    session.play_turn().unwrap();

    assert!(session.port().printed("Game saved"));
    let saved = persist::load(dir.path().join("ConsoleTetris.dat")).unwrap();
    assert_eq!(&saved, session.state());
}

#[test]
fn test_save_failure_keeps_playing() {
    let dir = tempfile::tempdir().unwrap();
    let (state, rng) = game_with_i(9);
    let settings = Settings::default().with_save_path(dir.path().join("no-dir").join("save.dat"));
    let port = ScriptedPort::new([Action::Save, Action::Unrecognized, Action::Left]);
    let mut session = Session::with_state(port, settings, rng, state);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Quit));
    assert!(session.port().printed("Save failed"));
    assert_eq!(session.state().current().bounds().0, 2);
}

#[test]
fn test_load_replaces_the_running_game() {
    let dir = tempfile::tempdir().unwrap();
    let script = [
        Action::Save,
        Action::Unrecognized,
        Action::Left,
        Action::Left,
        Action::Load,
        Action::Unrecognized,
    ];
    let mut session = scripted_session(script, &dir, 10);

    let end = session.run().unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert!(session.port().printed("Game loaded"));
    let saved = persist::load(dir.path().join("ConsoleTetris.dat")).unwrap();
    assert_eq!(&saved, session.state());
    assert_eq!(session.state().current().bounds().0, 3);
    // Initial screen plus the redraw for the loaded game
    assert_eq!(session.port().clears(), 2);
}

#[test]
fn test_load_failure_continues_current_game() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([Action::Load, Action::Unrecognized, Action::Right], &dir, 11);

    let end = session.run().unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert!(session.port().printed("Load failed"));
    assert_eq!(session.state().current().bounds().0, 4);
    assert_eq!(session.port().clears(), 1);
}

#[test]
fn test_new_game_discards_progress() {
    let dir = tempfile::tempdir().unwrap();
    let script = [Action::FastDown, Action::FastDown, Action::NewGame];
    let mut session = scripted_session(script, &dir, 12);

    let end = session.run().unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(session.state().count(), 0);
    assert_eq!(session.state().well().filled_cells(), 0);
    assert_eq!(session.port().clears(), 2);
}

#[test]
fn test_resume_falls_back_to_new_game() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::resume_or_new(ScriptedPort::new([]), settings(&dir), SimpleRng::new(13));

    assert_eq!(session.state().count(), 0);
    assert_eq!(session.state().width(), 10);
    assert_eq!(session.state().height(), 20);
}

#[test]
fn test_resume_picks_up_saved_game() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, mut rng) = game_with_i(14);
    state.apply_action(Action::FastDown);
    state.settle();
    state.spawn_next(&mut rng);
    persist::save(dir.path().join("ConsoleTetris.dat"), &state).unwrap();

    let session = Session::resume_or_new(ScriptedPort::new([]), settings(&dir), rng);

    assert_eq!(session.state(), &state);
    assert_eq!(session.state().count(), 1);
}

#[test]
fn test_session_runs_on_borrowed_port() {
    let dir = tempfile::tempdir().unwrap();
    let (state, rng) = game_with_i(15);
    let mut port = ScriptedPort::new([Action::Left]);

    {
        let mut session = Session::with_state(&mut port, settings(&dir), rng, state);
        assert_eq!(session.run().unwrap(), SessionEnd::Quit);
    }

    assert_eq!(port.remaining(), 0);
    assert_eq!(port.clears(), 1);
    assert!(port.printed("Ctrl+C"));
}

#[test]
fn test_initial_screen_draws_walls_and_help() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scripted_session([], &dir, 16);

    session.init_display().unwrap();

    assert_eq!(screen_block(&session, -1, 0), BlockType::Wall);
    assert_eq!(screen_block(&session, 10, 19), BlockType::Wall);
    assert_eq!(screen_block(&session, 4, -1), BlockType::Wall);
    assert_eq!(screen_block(&session, 4, 10), BlockType::Empty);
    assert!(session.port().printed("Space/Enter"));
}

#[test]
fn test_quit_while_paused_ends_the_turn() {
    let dir = tempfile::tempdir().unwrap();
    let (state, rng) = game_with_i(17);
    let port = ScriptedPort::new([Action::Pause, Action::Quit]).when_exhausted(Action::Empty);
    let mut session = Session::with_state(port, settings(&dir), rng, state);

    let outcome = session.play_turn().unwrap();

    assert!(matches!(outcome, TurnOutcome::Quit));
    assert_eq!(session.state().count(), 0);
    assert_eq!(session.port().polls().len(), 2);
}

#[test]
fn test_quit_dismissing_save_and_load_alerts_ends_the_run() {
    for first in [Action::Save, Action::Load] {
        let dir = tempfile::tempdir().unwrap();
        let (state, rng) = game_with_i(18);
        let port = ScriptedPort::new([first, Action::Quit]).when_exhausted(Action::Empty);
        let mut session = Session::with_state(port, settings(&dir), rng, state);

        assert_eq!(session.run().unwrap(), SessionEnd::Quit, "{first:?}");
        assert_eq!(session.state().count(), 0);
        assert_eq!(session.port().clears(), 1);
    }
}
