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
        DRAW, FUTILITY_MARGIN, FUTILITY_MAX_DEPTH, INF, LMR_MIN_DEPTH, LMR_MOVE_THRESHOLD,
        MATE, MATE_BOUND, MAX_CHECK_EXTENSIONS, MAX_ROOT_CANDIDATES, NULL_MOVE_MIN_DEPTH,
        NULL_MOVE_REDUCTION,
    },
    Search,
};
use crate::{
    board::{Board, Undo},
    defs::{MAX_MOVES, MAX_PLY, MOVE_POOL_SIZE},
    engine::transposition::{pack_move, unpack_move, Bound, PACKED_MOVE_NONE},
    evaluation::evaluate_position,
    movegen::defs::{Move, MoveFlags, MoveType},
    movegen::MoveGenerator,
};

impl Search {
    // Negamax with alpha-beta and the classical supporting heuristics:
    // transposition-table cutoffs, check extensions, futility and
    // null-move pruning, staged generation with best-first selection,
    // principal variation search, and late-move reductions. A return
    // value after the stop flag is set is garbage by contract; callers
    // discard it.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn negamax(
        &mut self,
        board: &mut Board,
        mg: &MoveGenerator,
        mut depth: i8,
        mut alpha: i16,
        beta: i16,
        ply: u8,
        do_null: bool,
        mut ext: u8,
    ) -> i16 {
        if self.stopped {
            return 0;
        }
        self.nodes += 1;
        self.check_time();
        if self.stopped {
            return 0;
        }

        let is_root = ply == 0;

        // Draw by repetition or the 50-move rule. Never at the root: a
        // move must still be produced there.
        if !is_root && (self.pos_history.is_repetition(board.hash) || board.halfmove >= 100) {
            return DRAW;
        }

        if depth <= 0 {
            return self.quiescence(board, mg, alpha, beta, ply, 0);
        }

        if ply >= MAX_PLY {
            return evaluate_position(board, &mut self.pawn_cache);
        }

        // Transposition table probe. Mate scores are stored ply-neutral
        // and re-adjusted to the current distance here.
        let mut tt_move = Move::NONE;
        if let Some((mut tt_score, tt_packed, tt_depth, tt_bound)) =
            self.tt.probe(board.hash, board.lock)
        {
            if tt_score > MATE_BOUND {
                tt_score -= ply as i16;
            } else if tt_score < -MATE_BOUND {
                tt_score += ply as i16;
            }

            // Never cut off at the root: a best move must be produced
            // there even when the table already knows the score.
            if tt_depth >= depth && !is_root {
                match tt_bound {
                    Bound::Exact => return tt_score,
                    Bound::Lower if tt_score >= beta => return beta,
                    Bound::Upper if tt_score <= alpha => return alpha,
                    _ => (),
                }
            }
            if tt_packed != PACKED_MOVE_NONE {
                tt_move = unpack_move(tt_packed);
            }
        }

        let check_info = mg.check_info(board);
        let in_check = check_info.in_check;

        // Check extension, at most twice per root-to-leaf path.
        if in_check && ext < MAX_CHECK_EXTENSIONS {
            depth += 1;
            ext += 1;
        }

        // Futility gate: at shallow depth with a static eval hopelessly
        // below alpha, quiet moves are skipped later in the move loop.
        let mut can_futility = false;
        if !in_check && depth <= FUTILITY_MAX_DEPTH && !is_root {
            let static_eval = evaluate_position(board, &mut self.pawn_cache);
            if static_eval + FUTILITY_MARGIN[depth as usize] <= alpha {
                can_futility = true;
            }
        }

        // Null-move pruning: give the opponent a free move; if a reduced
        // search still fails high, this node almost certainly would too.
        // Skipped in check, near the leaves, at the root, and without
        // non-pawn material (zugzwang).
        if do_null
            && !in_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && !is_root
            && board.has_non_pawn_material(board.side)
        {
            let null_undo = board.make_null_move();
            self.pos_history.push(board.hash);

            let score = -self.negamax(
                board,
                mg,
                depth - 1 - NULL_MOVE_REDUCTION,
                -beta,
                -beta + 1,
                ply + 1,
                false,
                ext,
            );

            self.pos_history.pop();
            board.unmake_null_move(null_undo);

            if self.stopped {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let mut best_score = -INF;
        let mut best_bound = Bound::Upper;
        let mut best_move = Move::NONE;
        let mut legal_moves: i32 = 0;
        let mut cutoff = false;

        // Staged generation: captures first, quiets second. Both stages
        // share the move pool; each claims a run at the current top and
        // releases it on the way out.
        for stage in 0..2 {
            if cutoff {
                break;
            }
            let mode = if stage == 0 { MoveType::Captures } else { MoveType::Quiets };

            let base = self.pool.top;
            if base + MAX_MOVES > MOVE_POOL_SIZE {
                // Pool exhausted: abort the stage with the static eval.
                return evaluate_position(board, &mut self.pawn_cache);
            }
            let count =
                mg.generate_into(board, mode, &mut self.pool.moves[base..base + MAX_MOVES]);
            self.pool.top = base + count;
            self.score_moves(board, base, count, ply, tt_move);

            for i in 0..count {
                self.pick_move(base, count, i);
                let m = self.pool.moves[base + i];

                if !mg.is_evasion_candidate(board, &check_info, m) {
                    continue;
                }

                // Futility: skip quiet moves once one legal move exists.
                if can_futility
                    && legal_moves > 0
                    && m.flags & (MoveFlags::CAPTURE | MoveFlags::PROMOTION) == 0
                {
                    continue;
                }

                let needs_check = mg.needs_verification(board, &check_info, m);

                let mut undo = Undo::default();
                board.make(m, &mut undo);
                if needs_check && !mg.is_legal(board) {
                    board.unmake(m, &undo);
                    continue;
                }
                legal_moves += 1;

                // First legal root move doubles as the fallback result in
                // case the clock runs out before any score lands.
                if is_root && self.best_root_move.is_none() {
                    self.best_root_move = m;
                }

                self.pos_history.push(board.hash);

                // PVS with late-move reductions. At the root with
                // move_variance active, the null window is widened
                // downward so near-best moves keep accurate scores; a
                // standard null window would clip every alternative to
                // alpha and make them indistinguishable.
                let new_depth = depth - 1;
                let mut got_accurate = false;
                let pvs_floor = if is_root && self.move_variance != 0 {
                    // Clamped so the widened window stays negatable.
                    (alpha as i32 - self.move_variance as i32).max(-(INF as i32)) as i16
                } else {
                    alpha
                };

                let mut score;
                if legal_moves == 1 {
                    // First move: full window.
                    score = -self.negamax(board, mg, new_depth, -beta, -alpha, ply + 1, true, ext);
                    got_accurate = true;
                } else if !in_check
                    && legal_moves > LMR_MOVE_THRESHOLD
                    && depth >= LMR_MIN_DEPTH
                    && m.flags & (MoveFlags::CAPTURE | MoveFlags::PROMOTION) == 0
                {
                    // Late quiet move: reduced null-window probe first.
                    score = -self.negamax(
                        board,
                        mg,
                        new_depth - 1,
                        -alpha - 1,
                        -pvs_floor,
                        ply + 1,
                        true,
                        ext,
                    );
                    if score > alpha && !self.stopped {
                        score =
                            -self.negamax(board, mg, new_depth, -beta, -alpha, ply + 1, true, ext);
                        got_accurate = true;
                    } else if score > pvs_floor {
                        got_accurate = true;
                    }
                } else {
                    // PVS null window, re-searched on an alpha raise.
                    score = -self.negamax(
                        board,
                        mg,
                        new_depth,
                        -alpha - 1,
                        -pvs_floor,
                        ply + 1,
                        true,
                        ext,
                    );
                    if score > alpha && score < beta && !self.stopped {
                        score =
                            -self.negamax(board, mg, new_depth, -beta, -alpha, ply + 1, true, ext);
                        got_accurate = true;
                    } else if score > pvs_floor {
                        got_accurate = true;
                    }
                }

                self.pos_history.pop();
                board.unmake(m, &undo);

                if self.stopped {
                    self.pool.top = base;
                    return 0;
                }

                // Optional root randomness for fixed-strength play.
                if is_root && self.eval_noise != 0 {
                    score += self.rand_noise();
                }

                // Root candidates for the move-variance pick. Only
                // accurately scored moves qualify; null-window fail-lows
                // all collapse to alpha and would look equal to the best.
                if is_root
                    && self.move_variance != 0
                    && self.root_count_pending < MAX_ROOT_CANDIDATES
                    && got_accurate
                {
                    self.root_moves_pending[self.root_count_pending] = m;
                    self.root_scores_pending[self.root_count_pending] = score;
                    self.root_count_pending += 1;
                }

                if score > best_score {
                    best_score = score;
                    best_move = m;

                    if is_root {
                        self.best_root_move = m;
                    }

                    if score > alpha {
                        alpha = score;
                        best_bound = Bound::Exact;

                        if alpha >= beta {
                            best_bound = Bound::Lower;
                            // Quiet cutoffs feed the killer and history
                            // ordering heuristics.
                            if m.flags & MoveFlags::CAPTURE == 0 {
                                self.update_killers(ply, m);
                                self.update_history(board.side, m, depth);
                            }
                            cutoff = true;
                            break;
                        }
                    }
                }
            }

            self.pool.top = base;
        }

        // No legal move at all: mate if in check, stalemate otherwise.
        if legal_moves == 0 {
            if in_check {
                return -MATE + ply as i16;
            }
            return DRAW;
        }

        // Store with the mate-score ply adjustment reversed, so the
        // entry is independent of where in the tree it was found.
        let mut store_score = best_score;
        if store_score > MATE_BOUND {
            store_score += ply as i16;
        } else if store_score < -MATE_BOUND {
            store_score -= ply as i16;
        }
        self.tt.store(
            board.hash,
            board.lock,
            store_score,
            pack_move(best_move),
            depth,
            best_bound,
        );

        best_score
    }
}
