// Evaluation scenarios: the starting position is near balance, the
// incremental baseline survives play, and the pawn cache never changes
// the result.

use slate_chess::{
    board::{Board, Undo},
    evaluation::{evaluate_position, PawnCache},
    movegen::defs::{MoveList, MoveType},
    movegen::MoveGenerator,
    FEN_START_POSITION,
};

fn board_from(fen: &str) -> Board {
    let mut board = Board::new();
    board.fen_read(Some(fen)).unwrap();
    board
}

#[test]
fn starting_position_is_balanced() {
    let board = board_from(FEN_START_POSITION);
    let mut cache = PawnCache::new();
    let score = evaluate_position(&board, &mut cache);
    assert!((-30..=30).contains(&score), "startpos scored {score}");
}

#[test]
fn evaluation_is_make_unmake_stable() {
    // Evaluating mid-sequence must not disturb the board, and the same
    // position always produces the same score whatever was evaluated in
    // between.
    let mg = MoveGenerator::new();
    let mut board = board_from(FEN_START_POSITION);
    let mut cache = PawnCache::new();

    let baseline = evaluate_position(&board, &mut cache);

    let mut list = MoveList::new();
    mg.generate_moves(&board, &mut list, MoveType::All);
    for &m in list.iter() {
        let mut undo = Undo::default();
        board.make(m, &mut undo);
        if mg.is_legal(&board) {
            evaluate_position(&board, &mut cache);
        }
        board.unmake(m, &undo);
    }

    assert_eq!(evaluate_position(&board, &mut cache), baseline);
}

#[test]
fn fresh_cache_agrees_with_warm_cache() {
    let fens = [
        FEN_START_POSITION,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "4k3/8/8/4P3/8/8/8/4K3 w - - 0 1",
    ];

    // Warm one cache over all positions, then compare against a cold
    // cache per position: identical scores, hit or miss.
    let mut warm = PawnCache::new();
    for fen in fens {
        evaluate_position(&board_from(fen), &mut warm);
    }
    for fen in fens {
        let board = board_from(fen);
        let mut cold = PawnCache::new();
        assert_eq!(
            evaluate_position(&board, &mut warm),
            evaluate_position(&board, &mut cold),
            "cache state changed the score of {fen}"
        );
    }
}

#[test]
fn passed_pawn_grows_with_rank() {
    let mut cache = PawnCache::new();
    let on_fourth = evaluate_position(&board_from("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1"), &mut cache);
    let on_sixth = evaluate_position(&board_from("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1"), &mut cache);
    assert!(
        on_sixth > on_fourth,
        "advanced passer must score higher: {on_sixth} vs {on_fourth}"
    );
}

#[test]
fn bishop_pair_is_worth_something() {
    let mut cache = PawnCache::new();
    // Bishop pair vs bishop + knight, otherwise identical.
    let pair = evaluate_position(&board_from("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1"), &mut cache);
    let mixed = evaluate_position(&board_from("4k3/8/8/8/8/8/8/2B1KN2 w - - 0 1"), &mut cache);
    assert!(pair > mixed - 60, "pair {pair} vs mixed {mixed}");
}

#[test]
fn mobility_prefers_the_open_board() {
    let mut cache = PawnCache::new();
    // A knight in the corner vs the same knight centralised.
    let corner = evaluate_position(&board_from("4k3/8/8/8/8/8/8/N3K3 w - - 0 1"), &mut cache);
    let centre = evaluate_position(&board_from("4k3/8/8/4N3/8/8/8/4K3 w - - 0 1"), &mut cache);
    assert!(centre > corner, "centre {centre} vs corner {corner}");
}
