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

pub mod defs;

use self::defs::{CheckInfo, Move, MoveFlags, MoveList, MoveType};
use crate::{
    board::defs::{
        is_black, make_piece, piece_type, square_is_valid, square_row, Castling, Pieces,
        Squares,
    },
    board::Board,
    defs::{Piece, Side, Sides, Square},
};

// Direction offsets in 0x88 coordinates. One row is 16 squares, so a
// knight's (2, 1) jump is 33, and so on. Stepping is done with wrapping
// byte arithmetic; any step that leaves the board produces an index whose
// 0x88 bit is set (or that lands in the sentinel half of the array).
pub const KNIGHT_OFFSETS: [i8; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
pub const BISHOP_OFFSETS: [i8; 4] = [-17, -15, 15, 17];
pub const ROOK_OFFSETS: [i8; 4] = [-16, -1, 1, 16];
pub const KING_OFFSETS: [i8; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];

fn step(sq: Square, dir: i8) -> Square {
    sq.wrapping_add(dir as u8)
}

fn is_enemy(piece: Piece, side: Side) -> bool {
    if piece == Pieces::NONE || piece == Pieces::OFFBOARD {
        return false;
    }
    let piece_is_black = is_black(piece);
    (side == Sides::WHITE) == piece_is_black
}

// The move generator is stateless; it exists as a struct so callers hold
// and pass one explicit instance, mirroring how the board is handled.
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    // Generates pseudo-legal moves for the side to move into the given
    // list. Moves are not legality-checked; the king may be left in
    // check, and the caller filters with make/unmake or the check/pin
    // fast path.
    pub fn generate_moves(&self, board: &Board, list: &mut MoveList, mode: MoveType) {
        list.clear();
        let count = self.generate_into(board, mode, list.buffer_mut());
        list.set_len(count);
    }

    // Same, but writing into a raw buffer (the search's shared move
    // pool). Returns the number of moves written.
    pub fn generate_into(&self, board: &Board, mode: MoveType, out: &mut [Move]) -> usize {
        let side = board.side;
        let mut count = 0;

        for i in 0..board.piece_count[side] as usize {
            let sq = board.piece_list[side][i];
            count += self.piece_moves(board, sq, side, mode, &mut out[count..]);
        }

        count
    }

    // Pseudo-legal moves from one square only, for UI move queries and
    // book-move matching. Produces nothing if the square is empty or
    // holds an enemy piece.
    pub fn generate_moves_from(&self, board: &Board, from: Square, list: &mut MoveList) {
        list.clear();

        let piece = board.squares[from as usize];
        if piece == Pieces::NONE || piece == Pieces::OFFBOARD {
            return;
        }
        let side = board.side;
        if is_black(piece) != (side == Sides::BLACK) {
            return;
        }

        let count = self.piece_moves(board, from, side, MoveType::All, list.buffer_mut());
        list.set_len(count);
    }

    fn piece_moves(
        &self,
        board: &Board,
        sq: Square,
        side: Side,
        mode: MoveType,
        out: &mut [Move],
    ) -> usize {
        match piece_type(board.squares[sq as usize]) {
            Pieces::PAWN => self.pawn_moves(board, sq, side, mode, out),
            Pieces::KNIGHT => self.leaper_moves(board, sq, side, mode, &KNIGHT_OFFSETS, out),
            Pieces::BISHOP => self.slider_moves(board, sq, side, mode, &BISHOP_OFFSETS, out),
            Pieces::ROOK => self.slider_moves(board, sq, side, mode, &ROOK_OFFSETS, out),
            Pieces::QUEEN => {
                let n = self.slider_moves(board, sq, side, mode, &BISHOP_OFFSETS, out);
                n + self.slider_moves(board, sq, side, mode, &ROOK_OFFSETS, &mut out[n..])
            }
            Pieces::KING => self.king_moves(board, sq, side, mode, out),
            _ => 0,
        }
    }

    fn pawn_moves(
        &self,
        board: &Board,
        sq: Square,
        side: Side,
        mode: MoveType,
        out: &mut [Move],
    ) -> usize {
        let mut count = 0;
        let dir: i8 = if side == Sides::WHITE { -16 } else { 16 };
        let start_row: u8 = if side == Sides::WHITE { 6 } else { 1 };
        let promo_row: u8 = if side == Sides::WHITE { 0 } else { 7 };

        // Pushes. Reaching the last rank expands into the four promotion
        // moves; a double push from the starting rank carries its flag so
        // make() can set the ep-square.
        if mode != MoveType::Captures {
            let target = step(sq, dir);
            if square_is_valid(target) && board.squares[target as usize] == Pieces::NONE {
                if square_row(target) == promo_row {
                    for promo in
                        [MoveFlags::PROMO_Q, MoveFlags::PROMO_R, MoveFlags::PROMO_B, MoveFlags::PROMO_N]
                    {
                        out[count] = Move::new(sq, target, MoveFlags::PROMOTION | promo);
                        count += 1;
                    }
                } else {
                    out[count] = Move::new(sq, target, 0);
                    count += 1;
                }

                if square_row(sq) == start_row {
                    let target = step(target, dir);
                    if square_is_valid(target) && board.squares[target as usize] == Pieces::NONE {
                        out[count] = Move::new(sq, target, MoveFlags::DOUBLE_PUSH);
                        count += 1;
                    }
                }
            }
        }

        // Diagonal captures, including the en-passant variant when the
        // destination is the current ep-square.
        if mode != MoveType::Quiets {
            for cap_dir in [dir - 1, dir + 1] {
                let target = step(sq, cap_dir);
                if !square_is_valid(target) {
                    continue;
                }

                if is_enemy(board.squares[target as usize], side) {
                    if square_row(target) == promo_row {
                        for promo in [
                            MoveFlags::PROMO_Q,
                            MoveFlags::PROMO_R,
                            MoveFlags::PROMO_B,
                            MoveFlags::PROMO_N,
                        ] {
                            out[count] = Move::new(
                                sq,
                                target,
                                MoveFlags::CAPTURE | MoveFlags::PROMOTION | promo,
                            );
                            count += 1;
                        }
                    } else {
                        out[count] = Move::new(sq, target, MoveFlags::CAPTURE);
                        count += 1;
                    }
                } else if board.ep_square == Some(target) {
                    out[count] =
                        Move::new(sq, target, MoveFlags::CAPTURE | MoveFlags::EN_PASSANT);
                    count += 1;
                }
            }
        }

        count
    }

    fn leaper_moves(
        &self,
        board: &Board,
        sq: Square,
        side: Side,
        mode: MoveType,
        offsets: &[i8],
        out: &mut [Move],
    ) -> usize {
        let mut count = 0;

        for &dir in offsets {
            let target = step(sq, dir);
            if !square_is_valid(target) {
                continue;
            }
            let occupant = board.squares[target as usize];

            if occupant == Pieces::NONE {
                if mode != MoveType::Captures {
                    out[count] = Move::new(sq, target, 0);
                    count += 1;
                }
            } else if is_enemy(occupant, side) && mode != MoveType::Quiets {
                out[count] = Move::new(sq, target, MoveFlags::CAPTURE);
                count += 1;
            }
        }

        count
    }

    fn slider_moves(
        &self,
        board: &Board,
        sq: Square,
        side: Side,
        mode: MoveType,
        offsets: &[i8],
        out: &mut [Move],
    ) -> usize {
        let mut count = 0;

        for &dir in offsets {
            let mut target = step(sq, dir);
            while square_is_valid(target) {
                let occupant = board.squares[target as usize];
                if occupant == Pieces::NONE {
                    if mode != MoveType::Captures {
                        out[count] = Move::new(sq, target, 0);
                        count += 1;
                    }
                } else {
                    if is_enemy(occupant, side) && mode != MoveType::Quiets {
                        out[count] = Move::new(sq, target, MoveFlags::CAPTURE);
                        count += 1;
                    }
                    break; // blocked
                }
                target = step(target, dir);
            }
        }

        count
    }

    fn king_moves(
        &self,
        board: &Board,
        sq: Square,
        side: Side,
        mode: MoveType,
        out: &mut [Move],
    ) -> usize {
        let mut count = self.leaper_moves(board, sq, side, mode, &KING_OFFSETS, out);

        // Castling is only emitted with the king on its home square, the
        // right still held, the rook still home, the gap empty, and the
        // king's current, pass-through and destination squares all safe.
        if mode == MoveType::Captures {
            return count;
        }

        if side == Sides::WHITE
            && sq == Squares::E1
            && board.castling & (Castling::WK | Castling::WQ) != 0
        {
            if self.square_attacked(board, Squares::E1, Sides::BLACK) {
                return count;
            }
            let rook = make_piece(Sides::WHITE, Pieces::ROOK);
            if board.castling & Castling::WK != 0
                && board.squares[Squares::H1 as usize] == rook
                && board.squares[Squares::E1 as usize + 1] == Pieces::NONE
                && board.squares[Squares::E1 as usize + 2] == Pieces::NONE
                && !self.square_attacked(board, Squares::E1 + 1, Sides::BLACK)
                && !self.square_attacked(board, Squares::E1 + 2, Sides::BLACK)
            {
                out[count] = Move::new(Squares::E1, Squares::E1 + 2, MoveFlags::CASTLE);
                count += 1;
            }
            if board.castling & Castling::WQ != 0
                && board.squares[Squares::A1 as usize] == rook
                && board.squares[Squares::E1 as usize - 1] == Pieces::NONE
                && board.squares[Squares::E1 as usize - 2] == Pieces::NONE
                && board.squares[Squares::E1 as usize - 3] == Pieces::NONE
                && !self.square_attacked(board, Squares::E1 - 1, Sides::BLACK)
                && !self.square_attacked(board, Squares::E1 - 2, Sides::BLACK)
            {
                out[count] = Move::new(Squares::E1, Squares::E1 - 2, MoveFlags::CASTLE);
                count += 1;
            }
        } else if side == Sides::BLACK
            && sq == Squares::E8
            && board.castling & (Castling::BK | Castling::BQ) != 0
        {
            if self.square_attacked(board, Squares::E8, Sides::WHITE) {
                return count;
            }
            let rook = make_piece(Sides::BLACK, Pieces::ROOK);
            if board.castling & Castling::BK != 0
                && board.squares[Squares::H8 as usize] == rook
                && board.squares[Squares::E8 as usize + 1] == Pieces::NONE
                && board.squares[Squares::E8 as usize + 2] == Pieces::NONE
                && !self.square_attacked(board, Squares::E8 + 1, Sides::WHITE)
                && !self.square_attacked(board, Squares::E8 + 2, Sides::WHITE)
            {
                out[count] = Move::new(Squares::E8, Squares::E8 + 2, MoveFlags::CASTLE);
                count += 1;
            }
            if board.castling & Castling::BQ != 0
                && board.squares[Squares::A8 as usize] == rook
                && board.squares[Squares::E8 as usize - 1] == Pieces::NONE
                && board.squares[Squares::E8 as usize - 2] == Pieces::NONE
                && board.squares[Squares::E8 as usize - 3] == Pieces::NONE
                && !self.square_attacked(board, Squares::E8 - 1, Sides::WHITE)
                && !self.square_attacked(board, Squares::E8 - 2, Sides::WHITE)
            {
                out[count] = Move::new(Squares::E8, Squares::E8 - 2, MoveFlags::CASTLE);
                count += 1;
            }
        }

        count
    }
}

// The square-attacked oracle and the once-per-node check/pin scan.
impl MoveGenerator {
    // Answers "is sq attacked by by_side?" without generating moves. It
    // probes knight and king offsets, the two pawn capture squares, and
    // the first occupied square on each of the eight rays.
    pub fn square_attacked(&self, board: &Board, sq: Square, by_side: Side) -> bool {
        // Knights.
        for &dir in &KNIGHT_OFFSETS {
            let target = step(sq, dir);
            if square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE
                    && p != Pieces::OFFBOARD
                    && (is_black(p) == (by_side == Sides::BLACK))
                    && piece_type(p) == Pieces::KNIGHT
                {
                    return true;
                }
            }
        }

        // Pawns. White pawns attack from one row below the target (a
        // higher 0x88 index), black pawns from one row above.
        let pawn_dir: i8 = if by_side == Sides::WHITE { 16 } else { -16 };
        let pawn = make_piece(by_side, Pieces::PAWN);
        for side_step in [-1i8, 1] {
            let target = step(sq, pawn_dir + side_step);
            if square_is_valid(target) && board.squares[target as usize] == pawn {
                return true;
            }
        }

        // The enemy king.
        for &dir in &KING_OFFSETS {
            let target = step(sq, dir);
            if square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE
                    && p != Pieces::OFFBOARD
                    && (is_black(p) == (by_side == Sides::BLACK))
                    && piece_type(p) == Pieces::KING
                {
                    return true;
                }
            }
        }

        // Diagonal rays: bishop or queen.
        for &dir in &BISHOP_OFFSETS {
            let mut target = step(sq, dir);
            while square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE {
                    if is_black(p) == (by_side == Sides::BLACK) {
                        let t = piece_type(p);
                        if t == Pieces::BISHOP || t == Pieces::QUEEN {
                            return true;
                        }
                    }
                    break;
                }
                target = step(target, dir);
            }
        }

        // Orthogonal rays: rook or queen.
        for &dir in &ROOK_OFFSETS {
            let mut target = step(sq, dir);
            while square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE {
                    if is_black(p) == (by_side == Sides::BLACK) {
                        let t = piece_type(p);
                        if t == Pieces::ROOK || t == Pieces::QUEEN {
                            return true;
                        }
                    }
                    break;
                }
                target = step(target, dir);
            }
        }

        false
    }

    // True if the position is legal after a make(): the side that just
    // moved must not have left its own king attacked.
    pub fn is_legal(&self, board: &Board) -> bool {
        let prev_side = board.side ^ 1;
        !self.square_attacked(board, board.king_sq[prev_side], board.side)
    }

    // Computes checkers and pinned squares once, from the king outward.
    // Ray walks rely on the off-board sentinel to stop: they load bytes
    // until something non-empty appears, then test validity once.
    pub fn check_info(&self, board: &Board) -> CheckInfo {
        let mut info = CheckInfo::new();
        let side = board.side;
        let opp = side ^ 1;
        let king_sq = board.king_sq[side];
        let opp_is_black = opp == Sides::BLACK;

        // Knight checkers.
        for &dir in &KNIGHT_OFFSETS {
            let target = step(king_sq, dir);
            if square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE
                    && p != Pieces::OFFBOARD
                    && is_black(p) == opp_is_black
                    && piece_type(p) == Pieces::KNIGHT
                {
                    info.add_checker(target);
                }
            }
        }

        // Pawn checkers.
        let pawn_dir: i8 = if opp == Sides::WHITE { 16 } else { -16 };
        let pawn = make_piece(opp, Pieces::PAWN);
        for side_step in [-1i8, 1] {
            let target = step(king_sq, pawn_dir + side_step);
            if square_is_valid(target) && board.squares[target as usize] == pawn {
                info.add_checker(target);
            }
        }

        // Adjacent enemy king. Cannot occur in a legal game, but the scan
        // stays robust for arbitrary set-up positions.
        for &dir in &KING_OFFSETS {
            let target = step(king_sq, dir);
            if square_is_valid(target) {
                let p = board.squares[target as usize];
                if p != Pieces::NONE
                    && p != Pieces::OFFBOARD
                    && is_black(p) == opp_is_black
                    && piece_type(p) == Pieces::KING
                {
                    info.add_checker(target);
                }
            }
        }

        // Sliding checkers and pins, one walk per ray.
        for &dir in &KING_OFFSETS {
            let is_orthogonal = matches!(dir, -16 | -1 | 1 | 16);
            let mut pinned_sq: Option<Square> = None;

            let mut target = step(king_sq, dir);
            while board.squares[target as usize] == Pieces::NONE {
                target = step(target, dir);
            }
            if !square_is_valid(target) {
                continue;
            }

            let mut p = board.squares[target as usize];
            if is_black(p) != opp_is_black {
                // First hit is friendly; it may be pinned. Keep walking.
                pinned_sq = Some(target);
                target = step(target, dir);
                while board.squares[target as usize] == Pieces::NONE {
                    target = step(target, dir);
                }
                if !square_is_valid(target) {
                    continue;
                }
                p = board.squares[target as usize];
            }

            if is_black(p) == opp_is_black {
                let t = piece_type(p);
                let slider = if is_orthogonal {
                    t == Pieces::ROOK || t == Pieces::QUEEN
                } else {
                    t == Pieces::BISHOP || t == Pieces::QUEEN
                };

                if slider {
                    match pinned_sq {
                        None => info.add_checker(target),
                        Some(sq) => {
                            if info.pinned_count < 8 {
                                info.pinned[info.pinned_count as usize] = sq;
                                info.pinned_count += 1;
                            }
                        }
                    }
                }
            }
        }

        info
    }

    // Decides whether a move needs a post-make legality test. Everything
    // not listed here is proven legal by the check/pin scan alone.
    pub fn needs_verification(&self, board: &Board, info: &CheckInfo, m: Move) -> bool {
        if info.in_check {
            return true;
        }
        if m.flags & MoveFlags::EN_PASSANT != 0 {
            return true;
        }
        if piece_type(board.squares[m.from as usize]) == Pieces::KING {
            return true;
        }
        info.is_pinned(m.from)
    }

    // Cheap filter for in-check nodes: keeps only moves that could
    // possibly evade the check. Double check leaves king moves only;
    // single check also allows capturing the checker (en passant
    // included) or, against a slider, blocking the ray.
    pub fn is_evasion_candidate(&self, board: &Board, info: &CheckInfo, m: Move) -> bool {
        if !info.in_check {
            return true;
        }

        if piece_type(board.squares[m.from as usize]) == Pieces::KING {
            return true;
        }

        if info.num_checkers >= 2 {
            return false;
        }

        let checker_sq = info.checker_sq[0];

        if m.to == checker_sq {
            return true;
        }

        // En passant can remove the checking pawn while landing elsewhere.
        if m.flags & MoveFlags::EN_PASSANT != 0 {
            let cap_sq = if board.side == Sides::WHITE {
                m.to.wrapping_add(16)
            } else {
                m.to.wrapping_sub(16)
            };
            if cap_sq == checker_sq {
                return true;
            }
        }

        let checker_type = piece_type(board.squares[checker_sq as usize]);
        if checker_type != Pieces::BISHOP
            && checker_type != Pieces::ROOK
            && checker_type != Pieces::QUEEN
        {
            return false; // non-slider checks cannot be blocked
        }

        let king_sq = board.king_sq[board.side];
        let dir = match ray_direction(king_sq, checker_sq) {
            Some(d) => d,
            None => return false,
        };

        let mut sq = step(king_sq, dir);
        while sq != checker_sq {
            if m.to == sq {
                return true;
            }
            sq = step(sq, dir);
        }

        false
    }
}

// The king-offset direction that leads from one square to another, if
// any ray does.
fn ray_direction(from: Square, to: Square) -> Option<i8> {
    for &dir in &KING_OFFSETS {
        let mut sq = step(from, dir);
        while square_is_valid(sq) {
            if sq == to {
                return Some(dir);
            }
            sq = step(sq, dir);
        }
    }
    None
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}
