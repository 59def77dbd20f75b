use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3::core::{finder, BoardConfig, Grid, TimingConfig};
use match3::engine::{hint, Board};

fn filled_board(seed: u32) -> Board {
    let mut board = Board::new(BoardConfig::default(), TimingConfig::instant(), seed).unwrap();
    board.setup_board();
    board.drain_events();
    board
}

fn bench_setup_board(c: &mut Criterion) {
    let mut board = Board::new(BoardConfig::default(), TimingConfig::instant(), 12345).unwrap();

    c.bench_function("setup_board_8x8", |b| {
        b.iter(|| {
            black_box(board.setup_board());
            board.drain_events();
        })
    });
}

fn bench_find_all_matches(c: &mut Criterion) {
    let board = filled_board(12345);

    c.bench_function("find_all_matches_8x8", |b| {
        b.iter(|| finder::find_all_matches(black_box(board.grid())))
    });
}

fn bench_collapse_column(c: &mut Criterion) {
    c.bench_function("collapse_8_columns", |b| {
        b.iter(|| {
            let mut grid = Grid::from_pattern(&[
                "RGBYRGBY", "........", "GBYRGBYR", "........", "BYRGBYRG", "........",
                "YRGBYRGB", "........",
            ])
            .unwrap();
            for x in 0..8 {
                black_box(grid.collapse_column(x));
            }
        })
    });
}

fn bench_matching_swaps(c: &mut Criterion) {
    let board = filled_board(12345);

    c.bench_function("matching_swaps_8x8", |b| {
        b.iter(|| hint::matching_swaps(black_box(board.grid())))
    });
}

fn bench_swap_cycle(c: &mut Criterion) {
    let board = filled_board(12345);

    c.bench_function("swap_and_settle", |b| {
        b.iter(|| {
            let mut board = board.clone();
            if let Some((from, to)) = hint::find_matching_swap(board.grid()) {
                board.request_swap(from, to);
                board.settle();
            }
            black_box(board.drain_events())
        })
    });
}

criterion_group!(
    benches,
    bench_setup_board,
    bench_find_all_matches,
    bench_collapse_column,
    bench_matching_swaps,
    bench_swap_cycle
);
criterion_main!(benches);
