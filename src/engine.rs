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
pub mod transposition;

use self::defs::{
    BenchResult, BookProbeFn, EngineHooks, EngineMove, EnginePosition, EngineSettings,
    GameStatus, MoveEffects, UI_EP_NONE,
};
use crate::{
    board::defs::{
        piece_to_ui, piece_type, square_col, square_of, square_row, Pieces,
    },
    board::{Board, FenError, Undo},
    defs::Sides,
    movegen::defs::{Move, MoveFlags, MoveList, MoveType},
    movegen::MoveGenerator,
    search::{Search, SearchLimits},
};
use if_chain::if_chain;

// The engine façade: the one surface the host UI, the UCI bridge and
// the benchmark harnesses talk to. It owns the board, the move
// generator and the search context, translates between the UI encoding
// and the internal representation, and keeps the position history in
// step with the moves actually made.
//
// The façade is strictly single-threaded: think() blocks until the
// search finishes or a limit fires. A host that wants to cancel does so
// through its time callback.
pub struct Engine {
    board: Board,
    mg: MoveGenerator,
    search: Search,
    hooks: EngineHooks,
    settings: EngineSettings,
    book_probe: Option<BookProbeFn>,
    last_was_book: bool,
}

impl Engine {
    pub fn new(hooks: EngineHooks) -> Self {
        let mut engine = Self {
            board: Board::new(),
            mg: MoveGenerator::new(),
            search: Search::new(),
            hooks,
            settings: EngineSettings::new(),
            book_probe: None,
            last_was_book: false,
        };
        engine.search.init();
        engine
    }

    // Starts a new game from the standard starting position.
    pub fn new_game(&mut self) {
        self.search.init();
        self.board.startpos();
        self.search.history_push(self.board.hash);
    }

    // ---- Position I/O ----

    pub fn set_position(&mut self, pos: &EnginePosition) {
        self.board.set_from_ui(
            &pos.board,
            pos.turn,
            pos.castling,
            pos.ep_row,
            pos.ep_col,
            pos.halfmove_clock,
            pos.fullmove_number,
        );
        self.search.history_clear();
        self.search.history_push(self.board.hash);
    }

    // FEN entry point for the CLI, tests, and the UCI bridge.
    pub fn set_position_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.board.fen_read(Some(fen))?;
        self.search.history_clear();
        self.search.history_push(self.board.hash);
        Ok(())
    }

    pub fn get_position(&self) -> EnginePosition {
        let mut pos = EnginePosition {
            board: [[0; 8]; 8],
            turn: if self.board.side == Sides::WHITE { 1 } else { -1 },
            castling: self.board.castling,
            ep_row: UI_EP_NONE,
            ep_col: UI_EP_NONE,
            halfmove_clock: self.board.halfmove,
            fullmove_number: self.board.fullmove,
        };

        for row in 0..8u8 {
            for col in 0..8u8 {
                pos.board[row as usize][col as usize] =
                    piece_to_ui(self.board.squares[square_of(row, col) as usize]);
            }
        }
        if let Some(ep) = self.board.ep_square {
            pos.ep_row = square_row(ep);
            pos.ep_col = square_col(ep);
        }

        pos
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    // ---- Legal move enumeration ----

    // Legal moves from one square, in the UI encoding. Pseudo-legal
    // moves are filtered with a real make/unmake legality check.
    pub fn get_moves_from(&mut self, row: u8, col: u8) -> Vec<EngineMove> {
        let mut list = MoveList::new();
        self.mg
            .generate_moves_from(&self.board, square_of(row, col), &mut list);
        self.filter_legal(&list)
    }

    pub fn get_all_moves(&mut self) -> Vec<EngineMove> {
        let mut list = MoveList::new();
        self.mg.generate_moves(&self.board, &mut list, MoveType::All);
        self.filter_legal(&list)
    }

    fn filter_legal(&mut self, list: &MoveList) -> Vec<EngineMove> {
        let mut result = Vec::with_capacity(list.len());
        for &m in list.iter() {
            let mut undo = Undo::default();
            self.board.make(m, &mut undo);
            if self.mg.is_legal(&self.board) {
                result.push(internal_to_engine_move(m));
            }
            self.board.unmake(m, &undo);
        }
        result
    }

    pub fn is_legal_move(&mut self, em: EngineMove) -> bool {
        let target = engine_to_internal_move(em);
        let mut list = MoveList::new();
        self.mg.generate_moves_from(&self.board, target.from, &mut list);

        for &m in list.iter() {
            if_chain! {
                if m.to == target.to;
                if m.flags & (MoveFlags::PROMOTION | MoveFlags::PROMO_MASK)
                    == target.flags & (MoveFlags::PROMOTION | MoveFlags::PROMO_MASK);
                then {
                    let mut undo = Undo::default();
                    self.board.make(m, &mut undo);
                    let legal = self.mg.is_legal(&self.board);
                    self.board.unmake(m, &undo);
                    return legal;
                }
            }
        }
        false
    }

    // ---- Move side effects ----

    // Reports the rook slide of a castling move and the true capture
    // square of an en-passant move. Computed from the move alone, BEFORE
    // it is made, so the host can animate.
    pub fn get_move_effects(&self, em: EngineMove) -> MoveEffects {
        let mut fx = MoveEffects::default();

        if em.flags & MoveFlags::CASTLE != 0 {
            fx.has_rook_move = true;
            fx.rook_from_row = em.from_row;
            fx.rook_to_row = em.from_row;
            if em.to_col > em.from_col {
                // Kingside: rook h-file to f-file.
                fx.rook_from_col = 7;
                fx.rook_to_col = 5;
            } else {
                // Queenside: rook a-file to d-file.
                fx.rook_from_col = 0;
                fx.rook_to_col = 3;
            }
        }

        if em.flags & MoveFlags::EN_PASSANT != 0 {
            fx.has_ep_capture = true;
            fx.ep_capture_row = em.from_row;
            fx.ep_capture_col = em.to_col;
        }

        fx
    }

    // ---- Making moves ----

    // Matches the UI move against the generated moves from its origin
    // square (recovering the full flag set), verifies legality, makes
    // the move, maintains the position history, and reports the
    // resulting game status. Promotions arrive with the chosen piece
    // already in the flag bits.
    pub fn make_move(&mut self, em: EngineMove) -> GameStatus {
        let target = engine_to_internal_move(em);
        let mut list = MoveList::new();
        self.mg.generate_moves_from(&self.board, target.from, &mut list);

        for &m in list.iter() {
            if m.to != target.to {
                continue;
            }
            if m.is_promotion()
                && m.flags & MoveFlags::PROMO_MASK != target.flags & MoveFlags::PROMO_MASK
            {
                continue;
            }

            let mut undo = Undo::default();
            self.board.make(m, &mut undo);
            if !self.mg.is_legal(&self.board) {
                self.board.unmake(m, &undo);
                continue;
            }

            // Legal and applied: update the history.
            if piece_type(undo.moved_piece) == Pieces::PAWN
                || undo.flags & MoveFlags::CAPTURE != 0
            {
                self.search.history_set_irreversible();
            }
            self.search.history_push(self.board.hash);

            if self.search.history_occurrences(self.board.hash) >= 3 {
                return GameStatus::RepetitionDraw;
            }
            return self.compute_status();
        }

        // No matching legal move; valid callers never get here.
        GameStatus::Normal
    }

    // ---- Status ----

    pub fn status(&mut self) -> GameStatus {
        self.compute_status()
    }

    pub fn in_check(&self) -> bool {
        self.mg.square_attacked(
            &self.board,
            self.board.king_sq[self.board.side],
            self.board.opponent(),
        )
    }

    fn compute_status(&mut self) -> GameStatus {
        if self.board.halfmove >= 100 {
            return GameStatus::FiftyMoveDraw;
        }
        if self.is_insufficient_material() {
            return GameStatus::MaterialDraw;
        }

        let in_check = self.in_check();
        let has_legal = !self.get_all_moves().is_empty();

        if !has_legal {
            return if in_check {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if in_check {
            return GameStatus::Check;
        }
        GameStatus::Normal
    }

    // K vs K, KN vs K, and KB vs K cannot force mate.
    fn is_insufficient_material(&self) -> bool {
        let wc = self.board.piece_count[Sides::WHITE];
        let bc = self.board.piece_count[Sides::BLACK];

        if wc == 1 && bc == 1 {
            return true;
        }

        let lone_minor = |side: usize| {
            (0..self.board.piece_count[side] as usize).any(|i| {
                let sq = self.board.piece_list[side][i];
                let t = piece_type(self.board.squares[sq as usize]);
                t == Pieces::KNIGHT || t == Pieces::BISHOP
            })
        };

        (wc == 1 && bc == 2 && lone_minor(Sides::BLACK))
            || (wc == 2 && bc == 1 && lone_minor(Sides::WHITE))
    }

    // ---- Fixed-strength knobs ----

    pub fn set_max_nodes(&mut self, nodes: u64) {
        self.settings.max_nodes = nodes;
    }

    pub fn set_eval_noise(&mut self, noise: i16) {
        self.settings.eval_noise = noise;
    }

    pub fn set_move_variance(&mut self, centipawns: i16) {
        self.settings.move_variance = centipawns;
    }

    pub fn set_use_book(&mut self, enabled: bool) {
        self.settings.use_book = enabled;
    }

    pub fn set_book_max_ply(&mut self, fullmoves: u16) {
        self.settings.book_max_ply = fullmoves;
    }

    pub fn set_book_probe(&mut self, probe: Option<BookProbeFn>) {
        self.book_probe = probe;
    }

    // ---- Thinking ----

    // Consults the opening book first; on a miss, runs the search under
    // the given limits plus the configured fixed-strength knobs.
    // Returns None when the side to move has no legal move at all.
    pub fn think(&mut self, max_depth: u8, max_time_ms: u32) -> Option<EngineMove> {
        if_chain! {
            if self.settings.use_book;
            if self.settings.book_max_ply == 0
                || self.board.fullmove <= self.settings.book_max_ply;
            if let Some(probe) = self.book_probe;
            if let Some(book_move) = probe(&self.board);
            then {
                self.last_was_book = true;
                return Some(internal_to_engine_move(book_move));
            }
        }
        self.last_was_book = false;

        let limits = SearchLimits {
            max_depth,
            max_time_ms,
            max_nodes: self.settings.max_nodes,
            time_fn: self.hooks.time_ms,
            eval_noise: self.settings.eval_noise,
            move_variance: self.settings.move_variance,
        };

        let result = self.search.go(&mut self.board, &self.mg, &limits);
        if result.best_move.is_none() {
            return None;
        }
        Some(internal_to_engine_move(result.best_move))
    }

    pub fn last_move_was_book(&self) -> bool {
        self.last_was_book
    }

    // Timed/fixed-depth search without noise, variance or node caps,
    // for benchmark harnesses.
    pub fn bench(&mut self, max_depth: u8, max_time_ms: u32) -> BenchResult {
        let limits = SearchLimits {
            max_depth,
            max_time_ms,
            max_nodes: 0,
            time_fn: self.hooks.time_ms,
            eval_noise: 0,
            move_variance: 0,
        };

        let result = self.search.go(&mut self.board, &self.mg, &limits);
        BenchResult {
            nodes: result.nodes,
            depth: result.depth,
        }
    }
}

// ---- UI move translation ----

fn internal_to_engine_move(m: Move) -> EngineMove {
    EngineMove {
        from_row: square_row(m.from),
        from_col: square_col(m.from),
        to_row: square_row(m.to),
        to_col: square_col(m.to),
        flags: m.flags,
    }
}

fn engine_to_internal_move(em: EngineMove) -> Move {
    Move::new(
        square_of(em.from_row, em.from_col),
        square_of(em.to_row, em.to_col),
        em.flags,
    )
}
