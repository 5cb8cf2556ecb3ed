use criterion::{black_box, criterion_group, criterion_main, Criterion};
use console_tetris::core::{persist, GameState, SimpleRng, Well};
use console_tetris::types::{Action, BlockType, PieceKind};

fn bench_turn(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut state = GameState::new(10, 20, &mut rng);

    c.bench_function("drop_lock_spawn", |b| {
        b.iter(|| {
            state.apply_action(black_box(Action::FastDown));
            state.settle();
            state.spawn_next(&mut rng);
            if state.is_game_over() {
                state = GameState::new(10, 20, &mut rng);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut well = Well::new(10, 20);
            // Fill bottom 4 rows
            for y in 0..4 {
                for x in 0..10 {
                    well.set(x, y, BlockType::Piece(PieceKind::I));
                }
            }
            well.clear_full_rows();
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut state = GameState::new(10, 20, &mut rng);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_next(&mut rng);
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut state = GameState::new(10, 20, &mut rng);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.apply_action(black_box(Action::Right));
            state.apply_action(black_box(Action::Left));
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut state = GameState::new(10, 20, &mut rng);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.apply_action(black_box(Action::Rotate));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let state = GameState::new(10, 20, &mut rng);

    c.bench_function("snapshot_round_trip", |b| {
        b.iter(|| {
            let mut bytes = Vec::new();
            persist::write_snapshot(&mut bytes, black_box(&state)).ok();
            persist::read_snapshot(bytes.as_slice()).ok()
        })
    });
}

criterion_group!(
    benches,
    bench_turn,
    bench_line_clear,
    bench_piece_spawn,
    bench_try_move,
    bench_try_rotate,
    bench_snapshot
);
criterion_main!(benches);
