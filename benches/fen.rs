use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lib::chess::{Board, Fen};

fn fen(c: &mut Criterion) {
    c.benchmark_group("benches").bench_function("fen", |b| {
        b.iter_batched_ref(
            Board::default,
            |board| Fen::from(&*board).to_string(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, fen);
criterion_main!(benches);
