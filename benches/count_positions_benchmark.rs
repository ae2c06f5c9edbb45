use negachess::board::Board;
use negachess::move_generator::MoveGenerator;

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let move_generator = MoveGenerator::new();
    c.bench_function("count all possible positions to depth 4", |b| {
        b.iter(|| {
            move_generator
                .count_positions(4, &mut Board::starting_position())
                .unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
