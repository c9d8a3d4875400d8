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
    board::defs::{is_black, piece_type, square_col},
    defs::{LockKey, Piece, Side, Sides, Square, ZobristKey},
};
use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

const RNG_SEED: u64 = 0x1234_5678;

const NR_OF_HASH_PIECES: usize = 12;

// Two independent key families drawn from the same deterministic stream:
// the primary 64-bit hash keys and the 16-bit lock keys the transposition
// table uses to verify a probe. A TT hit must match both, which makes an
// index collision between two different positions vanishingly cheap to
// detect.
pub struct ZobristRandoms {
    piece: [[ZobristKey; 64]; NR_OF_HASH_PIECES],
    castling: [ZobristKey; 16],
    ep_file: [ZobristKey; 8],
    side: ZobristKey,

    lock_piece: [[LockKey; 64]; NR_OF_HASH_PIECES],
    lock_castling: [LockKey; 16],
    lock_ep_file: [LockKey; 8],
    lock_side: LockKey,
}

impl ZobristRandoms {
    // The ChaCha stream is seeded with a fixed value, so the key tables
    // are identical on every run and search results are reproducible.
    pub fn new() -> Self {
        let mut random = ChaChaRng::seed_from_u64(RNG_SEED);
        let mut zr = Self {
            piece: [[0; 64]; NR_OF_HASH_PIECES],
            castling: [0; 16],
            ep_file: [0; 8],
            side: 0,
            lock_piece: [[0; 64]; NR_OF_HASH_PIECES],
            lock_castling: [0; 16],
            lock_ep_file: [0; 8],
            lock_side: 0,
        };

        zr.piece
            .iter_mut()
            .for_each(|per_piece| per_piece.iter_mut().for_each(|k| *k = random.gen()));
        zr.castling.iter_mut().for_each(|k| *k = random.gen());
        zr.ep_file.iter_mut().for_each(|k| *k = random.gen());
        zr.side = random.gen();

        // Lock keys come from the same stream, after the primary family.
        zr.lock_piece
            .iter_mut()
            .for_each(|per_piece| per_piece.iter_mut().for_each(|k| *k = random.gen()));
        zr.lock_castling.iter_mut().for_each(|k| *k = random.gen());
        zr.lock_ep_file.iter_mut().for_each(|k| *k = random.gen());
        zr.lock_side = random.gen();

        zr
    }

    // Maps an engine piece byte to the 0..11 hash-table row: white pawn =
    // 0 up to white king = 5, then the black pieces. Must not be called
    // with an empty square.
    fn hash_piece_index(piece: Piece) -> usize {
        let row = piece_type(piece) as usize - 1;
        if is_black(piece) {
            row + 6
        } else {
            row
        }
    }

    pub fn piece(&self, piece: Piece, sq64: usize) -> (ZobristKey, LockKey) {
        let idx = Self::hash_piece_index(piece);
        (self.piece[idx][sq64], self.lock_piece[idx][sq64])
    }

    pub fn castling(&self, castling: u8) -> (ZobristKey, LockKey) {
        (
            self.castling[castling as usize],
            self.lock_castling[castling as usize],
        )
    }

    // An absent ep-square hashes to nothing, so callers can XOR the
    // result unconditionally.
    pub fn en_passant(&self, ep_square: Option<Square>) -> (ZobristKey, LockKey) {
        match ep_square {
            Some(sq) => {
                let file = square_col(sq) as usize;
                (self.ep_file[file], self.lock_ep_file[file])
            }
            None => (0, 0),
        }
    }

    pub fn side(&self, side: Side) -> (ZobristKey, LockKey) {
        if side == Sides::BLACK {
            (self.side, self.lock_side)
        } else {
            (0, 0)
        }
    }

    // The side key itself, used when flipping the side to move.
    pub fn side_key(&self) -> (ZobristKey, LockKey) {
        (self.side, self.lock_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::defs::{make_piece, Pieces};

    #[test]
    fn tables_are_deterministic() {
        let a = ZobristRandoms::new();
        let b = ZobristRandoms::new();
        let wq = make_piece(Sides::WHITE, Pieces::QUEEN);
        assert_eq!(a.piece(wq, 28), b.piece(wq, 28));
        assert_eq!(a.castling(0x0F), b.castling(0x0F));
        assert_eq!(a.side_key(), b.side_key());
    }

    #[test]
    fn black_and_white_pieces_hash_differently() {
        let zr = ZobristRandoms::new();
        let wp = make_piece(Sides::WHITE, Pieces::PAWN);
        let bp = make_piece(Sides::BLACK, Pieces::PAWN);
        assert_ne!(zr.piece(wp, 0), zr.piece(bp, 0));
    }

    #[test]
    fn missing_ep_square_is_a_null_key() {
        let zr = ZobristRandoms::new();
        assert_eq!(zr.en_passant(None), (0, 0));
        assert_ne!(zr.en_passant(Some(0x24)), (0, 0));
    }
}
