use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{Fingerprint, GameCapability};
use games_tictactoe::{Action, State, TicTacToe};

fn midgame() -> State {
    State::from_moves(&[4, 0, 8, 2]).unwrap()
}

fn bench_generate_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_generate_moves");
    let game = TicTacToe::new();
    let opening = game.initial_state();
    let mid = midgame();

    group.bench_function("opening", |b| {
        b.iter(|| game.generate_moves(black_box(&opening)))
    });
    group.bench_function("midgame", |b| {
        b.iter(|| game.generate_moves(black_box(&mid)))
    });
    group.finish();
}

fn bench_apply_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_apply_move");
    group.bench_function("apply_center", |b| {
        let game = TicTacToe::new();
        let base_state = game.initial_state();
        b.iter_batched(
            || base_state,
            |state| game.apply_move(&state, &Action::Place(4)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_evaluate");
    let game = TicTacToe::new();
    let mid = midgame();

    group.bench_function("heuristic", |b| b.iter(|| game.evaluate(black_box(&mid))));
    group.bench_function("fingerprint", |b| {
        b.iter(|| black_box(&mid).fingerprint())
    });
    group.finish();
}

criterion_group!(benches, bench_generate_moves, bench_apply_move, bench_evaluate);
criterion_main!(benches);
