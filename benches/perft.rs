use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slate_chess::{
    board::Board,
    defs::{FEN_KIWIPETE_POSITION, FEN_START_POSITION},
    evaluation::{evaluate_position, PawnCache},
    misc::perft::perft,
    movegen::MoveGenerator,
    search::{Search, SearchLimits},
};

// Positions with different characteristics
const TEST_POSITIONS: &[(&str, &str)] = &[
    (FEN_START_POSITION, "Starting Position"),
    (FEN_KIWIPETE_POSITION, "Kiwipete"),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", "Rook Endgame"),
    (
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "Closed Middlegame",
    ),
];

fn setup_position(fen: &str) -> (Board, MoveGenerator) {
    let mut board = Board::new();
    board.fen_read(Some(fen)).expect("valid FEN");
    (board, MoveGenerator::new())
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    for (fen, name) in TEST_POSITIONS {
        let (mut board, mg) = setup_position(fen);
        group.bench_with_input(BenchmarkId::new("depth3", name), fen, |b, _| {
            b.iter(|| black_box(perft(&mut board, &mg, 3)))
        });
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    for (fen, name) in TEST_POSITIONS {
        let (board, _mg) = setup_position(fen);
        let mut cache = PawnCache::new();
        group.bench_with_input(BenchmarkId::new("evaluate", name), fen, |b, _| {
            b.iter(|| black_box(evaluate_position(&board, &mut cache)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for (fen, name) in TEST_POSITIONS {
        group.bench_with_input(BenchmarkId::new("depth4", name), fen, |b, fen| {
            b.iter(|| {
                let (mut board, mg) = setup_position(fen);
                let mut search = Search::new();
                search.init();
                search.history_push(board.hash);
                black_box(search.go(&mut board, &mg, &SearchLimits::depth(4)))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_evaluation, bench_search);
criterion_main!(benches);
