//! Benchmarks for dice race training.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dice_race::race::{selector, CountTable, Episode, RaceConfig, Trainer};

fn episode_benchmark(c: &mut Criterion) {
    let config = RaceConfig::default().with_seed(42);
    let mut trainer = Trainer::new(config).unwrap();

    c.bench_function("race_single_episode", |b| {
        b.iter(|| black_box(trainer.run_episode()))
    });
}

fn play_without_credit_benchmark(c: &mut Criterion) {
    let config = RaceConfig::default();
    let table = CountTable::new(config.l_target, config.n_dice);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("race_play_only", |b| {
        b.iter(|| black_box(Episode::play(&config, &table, &mut rng).turns()))
    });
}

fn selector_benchmark(c: &mut Criterion) {
    let table = CountTable::new(10, 6);

    c.bench_function("choice_distribution_6_dice", |b| {
        b.iter(|| black_box(selector::choice_distribution(table.slice(3, 4), black_box(5.0))))
    });
}

fn train_1000_games_benchmark(c: &mut Criterion) {
    c.bench_function("race_1000_games", |b| {
        b.iter(|| {
            let config = RaceConfig::default().with_seed(42);
            let mut trainer = Trainer::new(config).unwrap();
            trainer.train(black_box(1000)).games
        })
    });
}

criterion_group!(
    benches,
    episode_benchmark,
    play_without_credit_benchmark,
    selector_benchmark,
    train_1000_games_benchmark
);
criterion_main!(benches);
