use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let dense = BoardConfig::custom(30, 30, 810).expect("valid config");
    for (name, config) in [
        ("beginner", BoardConfig::beginner()),
        ("expert", BoardConfig::expert()),
        ("dense_30x30", dense),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMinefieldGenerator::new(seed).generate(config))
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let empty = Board::from_mine_coords((30, 30), &[]).expect("valid board");
    c.bench_function("flood_fill/open_30x30", |b| {
        b.iter_batched(
            || empty.clone(),
            |mut board| black_box(board.reveal_cell((15, 15))),
            criterion::BatchSize::SmallInput,
        )
    });

    let expert = RandomMinefieldGenerator::new(7).generate(BoardConfig::expert());
    let origin = expert
        .iter_coords()
        .find(|&pos| !expert[pos].is_mine() && expert[pos].neighbor_mines() == 0)
        .unwrap_or((0, 0));
    c.bench_function("flood_fill/expert", |b| {
        b.iter_batched(
            || expert.clone(),
            |mut board| black_box(board.reveal_cell(origin)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
