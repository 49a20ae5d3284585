use criterion::{Criterion, criterion_group, criterion_main};
use memorito_core::*;
use std::hint::black_box;

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for (name, shape) in [
        ("portrait", BoardShape::PORTRAIT),
        ("landscape", BoardShape::LANDSCAPE),
        ("wide", BoardShape::new_unchecked(26, 8)),
    ] {
        let mut generator = RandomBoardGenerator::new(0xdea1);
        group.bench_function(name, |b| b.iter(|| generator.generate(black_box(shape))));
    }
    group.finish();
}

fn bench_perfect_round(c: &mut Criterion) {
    c.bench_function("perfect_round", |b| {
        let mut session = GameSession::seeded(0x5e55, SessionConfig::default());
        b.iter(|| {
            session.start_round(BoardShape::PORTRAIT).unwrap();
            for pair in 0..session.total_pairs() {
                let positions: Vec<_> = session.positions_of(PairId(pair)).collect();
                let (first, second) = (positions[0], positions[1]);
                session.flip(first).unwrap();
                session.flip(second).unwrap();
                black_box(session.resolve_pending());
            }
        })
    });
}

criterion_group!(benches, bench_deal, bench_perfect_round);
criterion_main!(benches);
