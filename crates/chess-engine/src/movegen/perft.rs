//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth. Self-captures
//! change the tree from the third ply on, so only the first two plies match
//! the well-known standard chess numbers.

use super::{apply_move, generate_moves};
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .as_slice()
        .iter()
        .map(|m| perft(&apply_move(position, m.from, m.to), depth - 1))
        .sum()
}

/// Perft with divide - node count below each root move, sorted by move text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_moves(position);
    let mut results: Vec<(String, u64)> = moves
        .as_slice()
        .iter()
        .map(|m| {
            let next = apply_move(position, m.from, m.to);
            (m.to_uci(), perft(&next, depth.saturating_sub(1)))
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
