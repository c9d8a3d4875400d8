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

use crate::{
    board::{Board, Undo},
    movegen::defs::{MoveList, MoveType},
    movegen::MoveGenerator,
};

// Counts the leaf nodes of the legal move tree to the given depth.
// Perft is the canonical cross-check for move generation and
// make/unmake: one wrong flag anywhere and the counts diverge from the
// published values.
pub fn perft(board: &mut Board, mg: &MoveGenerator, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    mg.generate_moves(board, &mut list, MoveType::All);

    let mut nodes = 0;
    for i in 0..list.len() {
        let m = list.get_move(i);
        let mut undo = Undo::default();
        board.make(m, &mut undo);
        if mg.is_legal(board) {
            nodes += if depth == 1 {
                1
            } else {
                perft(board, mg, depth - 1)
            };
        }
        board.unmake(m, &undo);
    }

    nodes
}

// Perft with per-root-move subtotals printed, for pinpointing which
// move introduces a divergence.
pub fn divide(board: &mut Board, mg: &MoveGenerator, depth: u8) -> u64 {
    let mut list = MoveList::new();
    mg.generate_moves(board, &mut list, MoveType::All);

    let mut total = 0;
    for i in 0..list.len() {
        let m = list.get_move(i);
        let mut undo = Undo::default();
        board.make(m, &mut undo);
        if mg.is_legal(board) {
            let sub = if depth <= 1 {
                1
            } else {
                perft(board, mg, depth - 1)
            };
            println!("{}: {}", m.as_string(), sub);
            total += sub;
        }
        board.unmake(m, &undo);
    }

    println!("total: {total}");
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn shallow_startpos_counts() {
        let mut board = Board::new();
        board.fen_read(Some(FEN_START_POSITION)).unwrap();
        let mg = MoveGenerator::new();
        assert_eq!(perft(&mut board, &mg, 1), 20);
        assert_eq!(perft(&mut board, &mg, 2), 400);
        assert_eq!(perft(&mut board, &mg, 3), 8_902);
    }

    #[test]
    fn perft_leaves_board_unchanged() {
        let mut board = Board::new();
        board.fen_read(Some(FEN_START_POSITION)).unwrap();
        let mg = MoveGenerator::new();
        let hash_before = board.hash;
        perft(&mut board, &mg, 3);
        assert_eq!(board.hash, hash_before);
        assert!(board.piece_lists_consistent());
    }
}
