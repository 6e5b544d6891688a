use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use azero::{
    games::TicTacToe,
    util::{sample, softmax},
    Game, GameKind, Memoized, PlayOptions, State,
};

fn bench_tic_tac_toe_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("tic_tac_toe_step");
    let state = State::new(vec![1, -1, 0, 0, 1, 0, 0, 0, 0]);

    group.bench_function("plain", |b| {
        let game = TicTacToe;
        b.iter(|| game.step(black_box(&state), black_box(8)))
    });
    group.bench_function("memoized", |b| {
        let game = Memoized::new(TicTacToe);
        b.iter(|| game.step(black_box(&state), black_box(8)))
    });
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let mut rng = StdRng::seed_from_u64(0);

    for size in [3usize, 9, 64, 361] {
        let logits: Array1<f64> = (0..size).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let valid: Vec<bool> = (0..size).map(|i| i % 3 != 0).collect();

        group.bench_with_input(BenchmarkId::new("softmax", size), &size, |b, _| {
            b.iter(|| softmax(black_box(logits.view()), Some(valid.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("sample", size), &size, |b, _| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| sample(black_box(logits.view()), Some(valid.as_slice()), &mut rng))
        });
    }
    group.finish();
}

fn bench_self_play_episode(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play_batch");
    group.sample_size(20);
    let options = PlayOptions::new().set_seed(7);

    for kind in GameKind::iter() {
        let game = kind.build();
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| azero::self_play_batch(game.as_ref(), 100, &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tic_tac_toe_step, bench_sampling, bench_self_play_episode);
criterion_main!(benches);
