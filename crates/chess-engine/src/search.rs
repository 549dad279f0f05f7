//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The searcher maximizes on the computer's plies and minimizes on the
//! human's. Every root move is scored with a full window so that equal
//! scores are exact; the reply is then drawn uniformly from the moves
//! sharing the best score using the injected random source.

use crate::eval::evaluate_classified;
use crate::movegen::{apply_move, generate_moves};
use crate::rules::classify_with;
use crate::Position;
use chess_core::{Color, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Deepest search the engine accepts.
pub const MAX_DEPTH: u32 = 6;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched from the root; clamped to `1..=MAX_DEPTH`.
    pub depth: u32,
}

impl SearchConfig {
    /// The computer's move plus the human's best reply.
    pub const DEFAULT_DEPTH: u32 = 2;

    pub fn new(depth: u32) -> Self {
        SearchConfig { depth }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: Self::DEFAULT_DEPTH,
        }
    }
}

/// Search state
#[derive(Debug)]
pub struct Searcher<R = StdRng> {
    computer: Color,
    depth: u32,
    rng: R,
    nodes: u64,
}

impl Searcher<StdRng> {
    /// Creates a searcher whose tie-breaks are reproducible from `seed`.
    pub fn seeded(computer: Color, config: SearchConfig, seed: u64) -> Self {
        Searcher::new(computer, config, StdRng::seed_from_u64(seed))
    }

    /// Creates a searcher seeded from system entropy.
    pub fn from_entropy(computer: Color, config: SearchConfig) -> Self {
        Searcher::new(computer, config, StdRng::from_entropy())
    }
}

impl<R: Rng> Searcher<R> {
    pub fn new(computer: Color, config: SearchConfig, rng: R) -> Self {
        Searcher {
            computer,
            depth: config.depth.clamp(1, MAX_DEPTH),
            rng,
            nodes: 0,
        }
    }

    /// The color the searcher plays for.
    pub fn computer(&self) -> Color {
        self.computer
    }

    pub fn set_computer(&mut self, computer: Color) {
        self.computer = computer;
    }

    /// Effective search depth after clamping.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Nodes visited by the most recent call to [`Searcher::best_move`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the computer's move in `position`.
    ///
    /// Returns `None` when it is not the computer's turn or the computer has
    /// no legal move.
    pub fn best_move(&mut self, position: &Position) -> Option<Move> {
        self.nodes = 0;
        if position.side_to_move != self.computer {
            debug!(computer = %self.computer, "not the computer's turn");
            return None;
        }

        let moves = generate_moves(position);
        if moves.is_empty() {
            debug!("no legal moves for the computer");
            return None;
        }

        let mut best_score = i32::MIN;
        let mut candidates: Vec<Move> = Vec::new();
        for &m in moves.as_slice() {
            let next = apply_move(position, m.from, m.to);
            let score = self.minimax(&next, self.depth - 1, i32::MIN, i32::MAX);
            trace!(mv = %m, score, "root move scored");

            if score > best_score {
                best_score = score;
                candidates.clear();
                candidates.push(m);
            } else if score == best_score {
                candidates.push(m);
            }
        }

        let choice = candidates.choose(&mut self.rng).copied();
        debug!(
            depth = self.depth,
            nodes = self.nodes,
            score = best_score,
            candidates = candidates.len(),
            chosen = ?choice,
            "search complete"
        );
        choice
    }

    fn minimax(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        let moves = generate_moves(position);
        let result = classify_with(position, !moves.is_empty());
        if depth == 0 || result.is_over() {
            return evaluate_classified(position, self.computer, result);
        }

        if position.side_to_move == self.computer {
            let mut best = i32::MIN;
            for m in moves.as_slice() {
                let next = apply_move(position, m.from, m.to);
                let score = self.minimax(&next, depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for m in moves.as_slice() {
                let next = apply_move(position, m.from, m.to);
                let score = self.minimax(&next, depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
