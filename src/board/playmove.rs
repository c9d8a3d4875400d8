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

use super::{
    defs::{
        make_piece, piece_type, square_to_sq64, Pieces, CASTLING_MASK,
    },
    Board,
};
use crate::{
    defs::{LockKey, Piece, Sides, Square, ZobristKey},
    evaluation::defs::{eval_index, pst_flip, EG_TABLE, MG_TABLE, PHASE_WEIGHT},
    movegen::defs::{Move, MoveFlags},
};

// Everything make() mutates that cannot be recomputed cheaply is
// snapshotted here, so unmake() restores it by assignment instead of by
// reverse hashing. For an en-passant capture the captured field holds the
// pawn taken from its non-destination square.
#[derive(Clone, Copy, Default)]
pub struct Undo {
    pub captured: Piece,
    pub castling: u8,
    pub ep_square: Option<Square>,
    pub halfmove: u8,
    pub fullmove: u16,
    pub pawn_hash: ZobristKey,
    pub hash: ZobristKey,
    pub lock: LockKey,
    pub moved_piece: Piece,
    pub flags: u8,
}

// Snapshot needed to take back a null move.
#[derive(Clone, Copy)]
pub struct NullUndo {
    ep_square: Option<Square>,
    hash: ZobristKey,
    lock: LockKey,
}

impl Board {
    // Applies a pseudo-legal move. The caller owns legality: after make()
    // the mover's king may be in check, in which case the move must be
    // unmade. All incremental state (hashes, lock, mg/eg/phase, piece
    // lists, castling, ep, clocks) is maintained here.
    pub fn make(&mut self, m: Move, undo: &mut Undo) {
        let from = m.from;
        let to = m.to;
        let flags = m.flags;
        let piece = self.squares[from as usize];
        let captured = self.squares[to as usize];
        let side = self.side;
        let opp = side ^ 1;
        let t = piece_type(piece);
        let from64 = square_to_sq64(from);
        let to64 = square_to_sq64(to);
        let eidx = eval_index(t);
        let pst_from = if side == Sides::WHITE { from64 } else { pst_flip(from64) };
        let pst_to = if side == Sides::WHITE { to64 } else { pst_flip(to64) };

        // Snapshot the undo state.
        undo.captured = captured;
        undo.castling = self.castling;
        undo.ep_square = self.ep_square;
        undo.halfmove = self.halfmove;
        undo.fullmove = self.fullmove;
        undo.pawn_hash = self.pawn_hash;
        undo.hash = self.hash;
        undo.lock = self.lock;
        undo.moved_piece = piece;
        undo.flags = flags;

        // Halfmove clock: reset on pawn moves and captures, otherwise a
        // saturating increment so the byte cannot wrap.
        if t == Pieces::PAWN || flags & MoveFlags::CAPTURE != 0 {
            self.halfmove = 0;
        } else if self.halfmove < 255 {
            self.halfmove += 1;
        }

        // Hash the mover out of its origin square.
        let (k, l) = self.zr.piece(piece, from64);
        self.hash ^= k;
        self.lock ^= l;
        if t == Pieces::PAWN {
            self.pawn_hash ^= k;
        }
        self.mg[side] -= MG_TABLE[eidx][pst_from];
        self.eg[side] -= EG_TABLE[eidx][pst_from];

        if flags & MoveFlags::EN_PASSANT != 0 {
            // En passant: the captured pawn is not on the destination.
            let cap_sq = if side == Sides::WHITE {
                to.wrapping_add(16)
            } else {
                to.wrapping_sub(16)
            };
            let cap_piece = self.squares[cap_sq as usize];

            if cap_piece != Pieces::NONE {
                let cap64 = square_to_sq64(cap_sq);
                let cap_eidx = eval_index(piece_type(cap_piece));
                let cap_pst = if opp == Sides::WHITE { cap64 } else { pst_flip(cap64) };

                let (k, l) = self.zr.piece(cap_piece, cap64);
                self.hash ^= k;
                self.lock ^= l;
                if piece_type(cap_piece) == Pieces::PAWN {
                    self.pawn_hash ^= k;
                }
                self.mg[opp] -= MG_TABLE[cap_eidx][cap_pst];
                self.eg[opp] -= EG_TABLE[cap_eidx][cap_pst];
                self.phase -= PHASE_WEIGHT[cap_eidx];

                self.squares[cap_sq as usize] = Pieces::NONE;
                self.plist_remove(opp, cap_sq);
                if piece_type(cap_piece) == Pieces::BISHOP {
                    self.bishop_count[opp] -= 1;
                }
            }

            // The destination was empty, so the snapshot took NONE; store
            // the pawn actually captured for unmake.
            undo.captured = cap_piece;
        } else if captured != Pieces::NONE {
            // Normal capture.
            let cap_eidx = eval_index(piece_type(captured));
            let cap_pst = if opp == Sides::WHITE { to64 } else { pst_flip(to64) };

            let (k, l) = self.zr.piece(captured, to64);
            self.hash ^= k;
            self.lock ^= l;
            if piece_type(captured) == Pieces::PAWN {
                self.pawn_hash ^= k;
            }
            self.mg[opp] -= MG_TABLE[cap_eidx][cap_pst];
            self.eg[opp] -= EG_TABLE[cap_eidx][cap_pst];
            self.phase -= PHASE_WEIGHT[cap_eidx];

            self.plist_remove(opp, to);
            if piece_type(captured) == Pieces::BISHOP {
                self.bishop_count[opp] -= 1;
            }
        }

        // Move the piece on the board and in the piece list.
        self.squares[from as usize] = Pieces::NONE;
        self.squares[to as usize] = piece;
        self.plist_move(side, from, to);

        // Hash the mover in at the destination.
        let (k, l) = self.zr.piece(piece, to64);
        self.hash ^= k;
        self.lock ^= l;
        if t == Pieces::PAWN {
            self.pawn_hash ^= k;
        }
        self.mg[side] += MG_TABLE[eidx][pst_to];
        self.eg[side] += EG_TABLE[eidx][pst_to];

        // Promotion: retarget the destination square from pawn to the
        // promoted piece and swap the hash and eval contributions.
        if flags & MoveFlags::PROMOTION != 0 {
            let promo_type = m.promoted_type();
            let promo_piece = make_piece(side, promo_type);
            let promo_eidx = eval_index(promo_type);

            let (k, l) = self.zr.piece(piece, to64);
            self.hash ^= k;
            self.lock ^= l;
            self.pawn_hash ^= k;
            let (k, l) = self.zr.piece(promo_piece, to64);
            self.hash ^= k;
            self.lock ^= l;

            self.mg[side] -= MG_TABLE[eidx][pst_to];
            self.eg[side] -= EG_TABLE[eidx][pst_to];
            self.mg[side] += MG_TABLE[promo_eidx][pst_to];
            self.eg[side] += EG_TABLE[promo_eidx][pst_to];
            self.phase += PHASE_WEIGHT[promo_eidx];
            if promo_type == Pieces::BISHOP {
                self.bishop_count[side] += 1;
            }

            self.squares[to as usize] = promo_piece;
        }

        // Castling: the rook moves as well. Kingside rook goes from
        // king+3 to king+1, queenside from king-4 to king-1.
        if flags & MoveFlags::CASTLE != 0 {
            let (rook_from, rook_to) = if to > from {
                (from + 3, from + 1)
            } else {
                (from - 4, from - 1)
            };

            let rook = self.squares[rook_from as usize];
            let rf64 = square_to_sq64(rook_from);
            let rt64 = square_to_sq64(rook_to);
            let rook_pst_from = if side == Sides::WHITE { rf64 } else { pst_flip(rf64) };
            let rook_pst_to = if side == Sides::WHITE { rt64 } else { pst_flip(rt64) };
            let rook_eidx = eval_index(Pieces::ROOK);

            let (k, l) = self.zr.piece(rook, rf64);
            self.hash ^= k;
            self.lock ^= l;
            let (k, l) = self.zr.piece(rook, rt64);
            self.hash ^= k;
            self.lock ^= l;

            self.mg[side] -= MG_TABLE[rook_eidx][rook_pst_from];
            self.eg[side] -= EG_TABLE[rook_eidx][rook_pst_from];
            self.mg[side] += MG_TABLE[rook_eidx][rook_pst_to];
            self.eg[side] += EG_TABLE[rook_eidx][rook_pst_to];

            self.squares[rook_from as usize] = Pieces::NONE;
            self.squares[rook_to as usize] = rook;
            self.plist_move(side, rook_from, rook_to);
        }

        if t == Pieces::KING {
            self.king_sq[side] = to;
        }

        // Castling rights: AND with the mask for both endpoints, so king
        // and rook moves, and captures on a corner, revoke rights.
        let old_castling = self.castling;
        self.castling &= CASTLING_MASK[from as usize];
        self.castling &= CASTLING_MASK[to as usize];
        if old_castling != self.castling {
            let (k, l) = self.zr.castling(old_castling);
            self.hash ^= k;
            self.lock ^= l;
            let (k, l) = self.zr.castling(self.castling);
            self.hash ^= k;
            self.lock ^= l;
        }

        // En-passant square: set on a double push, cleared otherwise.
        let old_ep = self.ep_square;
        self.ep_square = if flags & MoveFlags::DOUBLE_PUSH != 0 {
            Some(if side == Sides::WHITE {
                from.wrapping_sub(16)
            } else {
                from.wrapping_add(16)
            })
        } else {
            None
        };
        let (k, l) = self.zr.en_passant(old_ep);
        self.hash ^= k;
        self.lock ^= l;
        let (k, l) = self.zr.en_passant(self.ep_square);
        self.hash ^= k;
        self.lock ^= l;

        // Flip the side to move.
        self.side ^= 1;
        let (k, l) = self.zr.side_key();
        self.hash ^= k;
        self.lock ^= l;

        // The fullmove counter increments after a black move.
        if side == Sides::BLACK {
            self.fullmove += 1;
        }
    }

    // Takes back a move made with make(). The hash fields, clocks,
    // castling and ep-square are restored from the undo snapshot; board
    // geometry and the incremental scores are rewound step by step.
    pub fn unmake(&mut self, m: Move, undo: &Undo) {
        let from = m.from;
        let to = m.to;
        let flags = undo.flags;
        let piece = undo.moved_piece;

        // Flip the side back first; everything below speaks about the
        // side that made the move.
        self.side ^= 1;
        let side = self.side;

        let t = piece_type(piece);
        let eidx = eval_index(t);
        let from64 = square_to_sq64(from);
        let to64 = square_to_sq64(to);
        let pst_from = if side == Sides::WHITE { from64 } else { pst_flip(from64) };
        let pst_to = if side == Sides::WHITE { to64 } else { pst_flip(to64) };

        // Promotion: undo the eval swap and put the pawn back on the
        // destination square before moving it home.
        if flags & MoveFlags::PROMOTION != 0 {
            let promo_type = m.promoted_type();
            let promo_eidx = eval_index(promo_type);

            self.mg[side] -= MG_TABLE[promo_eidx][pst_to];
            self.eg[side] -= EG_TABLE[promo_eidx][pst_to];
            self.mg[side] += MG_TABLE[eidx][pst_to];
            self.eg[side] += EG_TABLE[eidx][pst_to];
            self.phase -= PHASE_WEIGHT[promo_eidx];
            if promo_type == Pieces::BISHOP {
                self.bishop_count[side] -= 1;
            }

            self.squares[to as usize] = piece;
        }

        // Move the piece back.
        self.mg[side] -= MG_TABLE[eidx][pst_to];
        self.eg[side] -= EG_TABLE[eidx][pst_to];
        self.mg[side] += MG_TABLE[eidx][pst_from];
        self.eg[side] += EG_TABLE[eidx][pst_from];

        self.squares[from as usize] = piece;
        self.squares[to as usize] = Pieces::NONE;
        self.plist_move(side, to, from);

        if t == Pieces::KING {
            self.king_sq[side] = from;
        }

        // Castling: bring the rook home and undo its eval move.
        if flags & MoveFlags::CASTLE != 0 {
            let (rook_from, rook_to) = if to > from {
                (from + 3, from + 1)
            } else {
                (from - 4, from - 1)
            };

            let rf64 = square_to_sq64(rook_from);
            let rt64 = square_to_sq64(rook_to);
            let rook_pst_from = if side == Sides::WHITE { rf64 } else { pst_flip(rf64) };
            let rook_pst_to = if side == Sides::WHITE { rt64 } else { pst_flip(rt64) };
            let rook_eidx = eval_index(Pieces::ROOK);

            self.mg[side] -= MG_TABLE[rook_eidx][rook_pst_to];
            self.eg[side] -= EG_TABLE[rook_eidx][rook_pst_to];
            self.mg[side] += MG_TABLE[rook_eidx][rook_pst_from];
            self.eg[side] += EG_TABLE[rook_eidx][rook_pst_from];

            self.squares[rook_from as usize] = self.squares[rook_to as usize];
            self.squares[rook_to as usize] = Pieces::NONE;
            self.plist_move(side, rook_to, rook_from);
        }

        // Restore the captured piece. The piece list gets it appended at
        // the tail rather than at its original slot; list order carries
        // no meaning, so this is observationally equivalent.
        if flags & MoveFlags::EN_PASSANT != 0 {
            let cap_sq = if side == Sides::WHITE {
                to.wrapping_add(16)
            } else {
                to.wrapping_sub(16)
            };
            let opp = side ^ 1;

            if undo.captured != Pieces::NONE {
                let cap_eidx = eval_index(piece_type(undo.captured));
                let cap64 = square_to_sq64(cap_sq);
                let cap_pst = if opp == Sides::WHITE { cap64 } else { pst_flip(cap64) };

                self.mg[opp] += MG_TABLE[cap_eidx][cap_pst];
                self.eg[opp] += EG_TABLE[cap_eidx][cap_pst];
                self.phase += PHASE_WEIGHT[cap_eidx];
                if piece_type(undo.captured) == Pieces::BISHOP {
                    self.bishop_count[opp] += 1;
                }

                self.squares[cap_sq as usize] = undo.captured;
                self.plist_append(opp, cap_sq);
            }
        } else if undo.captured != Pieces::NONE {
            let opp = side ^ 1;
            let cap_eidx = eval_index(piece_type(undo.captured));
            let cap_pst = if opp == Sides::WHITE { to64 } else { pst_flip(to64) };

            self.mg[opp] += MG_TABLE[cap_eidx][cap_pst];
            self.eg[opp] += EG_TABLE[cap_eidx][cap_pst];
            self.phase += PHASE_WEIGHT[cap_eidx];
            if piece_type(undo.captured) == Pieces::BISHOP {
                self.bishop_count[opp] += 1;
            }

            self.squares[to as usize] = undo.captured;
            self.plist_append(opp, to);
        }

        // Everything snapshotted is restored wholesale.
        self.castling = undo.castling;
        self.ep_square = undo.ep_square;
        self.halfmove = undo.halfmove;
        self.fullmove = undo.fullmove;
        self.pawn_hash = undo.pawn_hash;
        self.hash = undo.hash;
        self.lock = undo.lock;
    }

    // A null move flips the side to move and clears the ep-square,
    // nothing else. Used by null-move pruning.
    pub fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            ep_square: self.ep_square,
            hash: self.hash,
            lock: self.lock,
        };

        let (k, l) = self.zr.side_key();
        self.side ^= 1;
        self.hash ^= k;
        self.lock ^= l;

        let (k, l) = self.zr.en_passant(self.ep_square);
        self.hash ^= k;
        self.lock ^= l;
        self.ep_square = None;

        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side ^= 1;
        self.hash = undo.hash;
        self.lock = undo.lock;
        self.ep_square = undo.ep_square;
    }
}
