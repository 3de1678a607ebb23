use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use engine_core::GameCapability;
use games_connect4::{Connect4, State as Connect4State};
use games_tictactoe::TicTacToe;
use minimax::{get_best_move, minimax_ab, SearchCache, SCORE_INFINITY};

fn bench_tictactoe_full_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_full_tree");
    let game = TicTacToe::new();
    let state = game.initial_state();

    group.bench_function("uncached", |b| {
        b.iter(|| {
            minimax_ab(
                &game,
                black_box(&state),
                9,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                None,
            )
        })
    });
    group.bench_function("cached", |b| {
        b.iter(|| {
            let mut cache = SearchCache::new();
            minimax_ab(
                &game,
                black_box(&state),
                9,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                Some(&mut cache),
            )
        })
    });
    group.finish();
}

fn bench_connect4_best_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect4_best_move");
    group.sample_size(20);
    let game = Connect4::new();
    let opening = game.initial_state();
    let midgame = Connect4State::from_moves(&[3, 3, 2, 4, 4, 2, 5]).unwrap();

    for depth in [2u32, 4, 6] {
        group.bench_with_input(BenchmarkId::new("opening_uncached", depth), &depth, |b, &d| {
            b.iter(|| get_best_move(&game, black_box(&opening), d, None))
        });
        group.bench_with_input(BenchmarkId::new("opening_cached", depth), &depth, |b, &d| {
            b.iter(|| {
                let mut cache = SearchCache::new();
                get_best_move(&game, black_box(&opening), d, Some(&mut cache))
            })
        });
        group.bench_with_input(BenchmarkId::new("midgame_cached", depth), &depth, |b, &d| {
            b.iter(|| {
                let mut cache = SearchCache::new();
                get_best_move(&game, black_box(&midgame), d, Some(&mut cache))
            })
        });
    }
    group.finish();
}

fn bench_cache_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect4_warm_cache");
    let game = Connect4::new();
    let state = game.initial_state();
    let mut cache = SearchCache::new();
    // Warm once; later iterations are answered mostly from the table
    let _ = get_best_move(&game, &state, 5, Some(&mut cache));

    group.bench_function("depth_5", |b| {
        b.iter(|| get_best_move(&game, black_box(&state), 5, Some(&mut cache)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tictactoe_full_tree,
    bench_connect4_best_move,
    bench_cache_reuse
);
criterion_main!(benches);
