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
        SearchLimits, SearchResult, ASPIRATION_WINDOW, DEADLINE_GRACE_MS,
        FALLBACK_NODES_PER_MS, INF,
    },
    Search,
};
use crate::{
    board::Board,
    defs::MAX_PLY,
    movegen::{defs::Move, MoveGenerator},
};

impl Search {
    // Iterative deepening driver. Runs depths 1, 2, ... until a limit
    // fires, committing the best root move and candidate list after
    // each completed iteration. The board comes back unchanged.
    pub fn go(&mut self, board: &mut Board, mg: &MoveGenerator, limits: &SearchLimits) -> SearchResult {
        // Per-search reset. Committed root candidates are per-search
        // state as well; stale ones must never leak into the variance
        // pick of a later position.
        self.nodes = 0;
        self.stopped = false;
        self.best_root_move = Move::NONE;
        self.pool.top = 0;
        self.root_count = 0;
        self.root_count_pending = 0;

        self.time_fn = limits.time_fn;
        self.deadline = match (limits.max_time_ms, self.time_fn) {
            (ms, Some(time_fn)) if ms > 0 => time_fn().wrapping_add(ms),
            _ => 0,
        };
        self.max_nodes = limits.max_nodes;
        // Node-count fallback for a dead host clock; see defs.
        self.node_deadline = if limits.max_time_ms > 0 {
            limits.max_time_ms as u64 * FALLBACK_NODES_PER_MS
        } else {
            0
        };
        self.eval_noise = limits.eval_noise;
        self.move_variance = limits.move_variance;

        // Seed the PRNG from the position and the clock; a stubbed time
        // callback makes the whole search deterministic.
        self.rng_state = (board.hash as u32) ^ 0xDEAD;
        if let Some(time_fn) = self.time_fn {
            self.rng_state ^= time_fn();
        }
        if self.rng_state == 0 {
            self.rng_state = 1;
        }

        let mut max_depth = limits.max_depth;
        if max_depth == 0 && limits.max_time_ms == 0 && limits.max_nodes == 0 {
            max_depth = 1;
        }
        if max_depth == 0 {
            max_depth = MAX_PLY - 1;
        }

        let mut result = SearchResult::new();

        let mut depth: u8 = 1;
        while depth <= max_depth {
            self.best_root_move = Move::NONE;
            self.root_count_pending = 0;

            // Aspiration: a narrow window around the previous score,
            // falling back to the infinite window on failure.
            let (mut asp_alpha, mut asp_beta) = (-INF, INF);
            if depth > 1 && !result.best_move.is_none() {
                asp_alpha = result.score - ASPIRATION_WINDOW;
                asp_beta = result.score + ASPIRATION_WINDOW;
            }

            let mut score = self.negamax(board, mg, depth as i8, asp_alpha, asp_beta, 0, true, 0);

            if !self.stopped && (score <= asp_alpha || score >= asp_beta) {
                self.best_root_move = Move::NONE;
                self.root_count_pending = 0;
                score = self.negamax(board, mg, depth as i8, -INF, INF, 0, true, 0);
            }

            if self.stopped {
                // Ran out of time before any root move was recorded at
                // all (check extensions can blow up a shallow iteration
                // on slow hosts): extend the deadline and retry the
                // same depth rather than returning no move. Pointless
                // when a node limit caused the stop, since node counts
                // survive the retry.
                let node_limited = (self.max_nodes != 0 && self.nodes >= self.max_nodes)
                    || (self.node_deadline != 0 && self.nodes >= self.node_deadline);
                if result.best_move.is_none()
                    && self.best_root_move.is_none()
                    && self.deadline != 0
                    && !node_limited
                {
                    if let Some(time_fn) = self.time_fn {
                        self.deadline = time_fn().wrapping_add(DEADLINE_GRACE_MS);
                        self.stopped = false;
                        continue;
                    }
                }
                break;
            }

            // Completed iteration: commit.
            if !self.best_root_move.is_none() {
                result.best_move = self.best_root_move;
                result.score = score;
                result.depth = depth;
                result.nodes = self.nodes;
                self.root_count = self.root_count_pending;
                self.root_moves[..self.root_count]
                    .copy_from_slice(&self.root_moves_pending[..self.root_count]);
                self.root_scores[..self.root_count]
                    .copy_from_slice(&self.root_scores_pending[..self.root_count]);
            }

            depth += 1;
        }

        // An interrupted first iteration may still have produced a
        // first-legal-move fallback.
        if result.best_move.is_none() && !self.best_root_move.is_none() {
            result.best_move = self.best_root_move;
            result.score = 0;
            result.depth = 0;
            result.nodes = self.nodes;
        }

        // Move variance: replace the best move by a random root
        // candidate within the configured centipawn threshold.
        if self.move_variance != 0 && self.root_count > 1 {
            let mut best = -INF;
            for i in 0..self.root_count {
                best = best.max(self.root_scores[i]);
            }
            let threshold = (best as i32 - self.move_variance as i32).max(-(INF as i32)) as i16;

            let n_candidates = self.root_scores[..self.root_count]
                .iter()
                .filter(|&&s| s >= threshold)
                .count();

            if n_candidates > 1 {
                let pick = (self.rand_step() as usize) % n_candidates;
                let mut seen = 0;
                for i in 0..self.root_count {
                    if self.root_scores[i] >= threshold {
                        if seen == pick {
                            result.best_move = self.root_moves[i];
                            result.score = self.root_scores[i];
                            break;
                        }
                        seen += 1;
                    }
                }
            }
        }

        result
    }
}
