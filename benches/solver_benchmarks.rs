//! Benchmarks for move generation and proof-game search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use proof_game::board::Position;
use proof_game::solver::{solve_with, SolverConfig};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = Position::initial();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let kiwipete = Position::from_fen(KIWIPETE);
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::initial();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let kiwipete = Position::from_fen(KIWIPETE);
    group.bench_function("kiwipete", |b| b.iter(|| black_box(kiwipete.legal_moves())));

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    let target = Position::from_fen(FOOLS_MATE);
    for prune in [true, false] {
        let config = SolverConfig::with_max_plies(4).prune(prune);
        let label = if prune { "pruned" } else { "exhaustive" };
        group.bench_function(BenchmarkId::new("fools_mate", label), |b| {
            b.iter(|| solve_with(black_box(&target), &config))
        });
    }

    let config = SolverConfig::with_max_plies(4).threads(4).parallel_threshold(64);
    group.bench_function(BenchmarkId::new("fools_mate", "parallel"), |b| {
        b.iter(|| solve_with(black_box(&target), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_solve);
criterion_main!(benches);
