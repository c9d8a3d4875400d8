/* =======================================================================
Slate is a chess playing engine.
Copyright (C) 2025-2026, The Slate Authors

Slate is written in the Rust programming language. It is an original
work, not derived from any engine that came before it. However, it does
use a lot of concepts which are well-known and are in use by most if not
all classical alpha/beta-based chess engines.

Slate is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Slate is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

// Diagnostic driver: sets up a position, then runs perft or a search
// with the requested limits and prints the outcome. The engine core
// itself performs no I/O; everything visible happens here.

use slate_chess::{
    board::Board,
    defs::{About, FEN_KIWIPETE_POSITION},
    evaluation::{evaluate_breakdown, PawnCache},
    misc::{
        cmdline::CmdLine,
        perft::{divide, perft},
    },
    movegen::MoveGenerator,
    search::{Search, SearchLimits},
};
use std::time::Instant;

fn time_ms() -> u32 {
    use std::sync::OnceLock;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_millis() as u32
}

fn main() {
    let cmdline = CmdLine::new();

    println!("{} {}", About::ENGINE, About::VERSION);

    let fen = if cmdline.has_kiwipete() {
        FEN_KIWIPETE_POSITION.to_string()
    } else {
        cmdline.fen()
    };

    let mut board = Board::new();
    if let Err(error) = board.fen_read(Some(&fen)) {
        eprintln!("FEN rejected: {error}");
        std::process::exit(1);
    }
    println!("position: {fen}");

    let mg = MoveGenerator::new();

    // Static evaluation breakdown, term by term.
    if cmdline.has_eval() {
        let mut cache = PawnCache::new();
        println!("{}", evaluate_breakdown(&board, &mut cache));
        return;
    }

    // Perft mode takes precedence over searching.
    let perft_depth = cmdline.perft();
    if perft_depth > 0 {
        let started = Instant::now();
        let nodes = if cmdline.has_divide() {
            divide(&mut board, &mg, perft_depth)
        } else {
            perft(&mut board, &mg, perft_depth)
        };
        let elapsed = started.elapsed().as_secs_f64();
        let nps = if elapsed > 0.0 { nodes as f64 / elapsed } else { 0.0 };
        println!("perft({perft_depth}) = {nodes}  ({elapsed:.3}s, {nps:.0} nps)");
        return;
    }

    // Search mode.
    let limits = SearchLimits {
        max_depth: cmdline.depth(),
        max_time_ms: cmdline.time(),
        max_nodes: cmdline.nodes(),
        time_fn: Some(time_ms),
        eval_noise: 0,
        move_variance: 0,
    };

    let mut search = Search::new();
    search.init();
    search.history_push(board.hash);

    let started = Instant::now();
    let result = search.go(&mut board, &mg, &limits);
    let elapsed = started.elapsed().as_secs_f64();

    if result.best_move.is_none() {
        println!("no legal move");
        return;
    }

    println!(
        "bestmove {}  score {} cp  depth {}  nodes {}  ({elapsed:.3}s)",
        result.best_move.as_string(),
        result.score,
        result.depth,
        result.nodes
    );
}
