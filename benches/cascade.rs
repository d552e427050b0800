use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cascade_arcade::core::{Grid, Seed, Session};
use cascade_arcade::engine::fold::{stack_fold, Axis};
use cascade_arcade::engine::sandpile::topple;
use cascade_arcade::engine::stacker::{Stacker, StackerMove};
use cascade_arcade::engine::tiles::reduce;
use cascade_arcade::types::{Mode, SANDPILE_SIZE, SANDPILE_THRESHOLD};

fn bench_burst_storm(c: &mut Criterion) {
    c.bench_function("sandpile_burst_storm", |b| {
        b.iter(|| {
            // Every cell one short of bursting, then one drop in the middle.
            let mut board = Grid::new(SANDPILE_SIZE, SANDPILE_SIZE, SANDPILE_THRESHOLD - 1);
            let mid = (SANDPILE_SIZE / 2) as i32;
            board.set(mid, mid, SANDPILE_THRESHOLD);
            topple(black_box(&mut board), SANDPILE_THRESHOLD)
        })
    });
}

fn bench_stacker_drop(c: &mut Criterion) {
    let seed = Seed::custom("2024-03-09", Mode::Daily);
    let mut session = Session::started(Stacker, seed.clone());

    c.bench_function("stacker_drop", |b| {
        b.iter(|| {
            if session.phase().is_terminal() {
                session.start(seed.clone());
            }
            session.play(black_box(StackerMove::Drop))
        })
    });
}

fn bench_tile_reduction(c: &mut Criterion) {
    let line: Vec<char> = "ABCDDCBAABCDDCBAABCD".chars().collect();

    c.bench_function("tiles_reduce", |b| {
        b.iter(|| {
            let mut letters = line.clone();
            reduce(black_box(&mut letters))
        })
    });
}

fn bench_fold(c: &mut Criterion) {
    let mut grid = Grid::new(6, 6, 0u8);
    for (row, col) in (0..6).zip([0, 2, 4, 1, 3, 5]) {
        grid.set(row, col, 1);
    }

    c.bench_function("fold_stack", |b| {
        b.iter(|| stack_fold(black_box(&grid), Axis::Vertical, 2))
    });
}

criterion_group!(
    benches,
    bench_burst_storm,
    bench_stacker_drop,
    bench_tile_reduction,
    bench_fold
);
criterion_main!(benches);
