//! Game rules that look at whole positions: result classification and
//! checked move application for callers outside the engine.

use crate::movegen::{apply_move, generate_moves, is_king_attacked, legal_moves};
use crate::Position;
use chess_core::{Color, PieceKind, Square};

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Classification of a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The side to move has legal moves and no draw applies.
    Ongoing,
    /// The given color is checkmated.
    Checkmate(Color),
    /// No legal moves but not in check.
    Stalemate,
    /// 100 half-moves without pawn move or capture.
    FiftyMoveDraw,
}

impl GameResult {
    /// Returns true unless the game goes on.
    pub const fn is_over(self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    /// The winning color, if the position is a checkmate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate(loser) => Some(loser.opposite()),
            _ => None,
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// 50-move rule (100 half-moves without pawn move or capture).
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// Neither side can possibly checkmate.
    InsufficientMaterial,
}

/// Returns true if the side to move is in check.
pub fn is_check(position: &Position) -> bool {
    is_king_attacked(position, position.side_to_move)
}

/// Classifies a position.
///
/// Mate and stalemate are decided first; the fifty-move rule only applies
/// while the side to move still has a legal move.
pub fn classify(position: &Position) -> GameResult {
    let has_moves = !generate_moves(position).is_empty();
    classify_with(position, has_moves)
}

/// Classification when the caller already knows whether moves exist.
pub(crate) fn classify_with(position: &Position, has_moves: bool) -> GameResult {
    if !has_moves {
        if is_check(position) {
            GameResult::Checkmate(position.side_to_move)
        } else {
            GameResult::Stalemate
        }
    } else if position.halfmove_clock >= FIFTY_MOVE_PLIES {
        GameResult::FiftyMoveDraw
    } else {
        GameResult::Ongoing
    }
}

/// Applies a move requested from outside the engine.
///
/// Returns `None`, leaving nothing changed, unless `to` is one of
/// [`legal_moves`] for `from`.
pub fn apply_human_move(position: &Position, from: Square, to: Square) -> Option<Position> {
    if legal_moves(position, from).contains(&to) {
        Some(apply_move(position, from, to))
    } else {
        None
    }
}

/// Returns true if neither side has enough material to checkmate: bare
/// kings, a single minor piece against a bare king, or one bishop each on
/// squares of the same color.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = Vec::new();
    for (sq, piece) in position.board.occupied() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors.push((sq, piece)),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(a, pa), (b, pb)] => {
            pa.kind == PieceKind::Bishop
                && pb.kind == PieceKind::Bishop
                && pa.color != pb.color
                && (a.file() + a.rank()) % 2 == (b.file() + b.rank()) % 2
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn initial_position_is_ongoing() {
        assert_eq!(classify(&Position::initial()), GameResult::Ongoing);
        assert!(!is_check(&Position::initial()));
    }

    #[test]
    fn stalemate() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(classify(&position), GameResult::Stalemate);
        assert!(classify(&position).is_over());
    }

    #[test]
    fn checkmate() {
        let position = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = classify(&position);
        assert_eq!(result, GameResult::Checkmate(Color::Black));
        assert_eq!(result.winner(), Some(Color::White));
    }

    #[test]
    fn check_with_escape_is_ongoing() {
        let position = Position::from_fen("7k/8/6K1/8/8/8/8/7R b - - 0 1").unwrap();
        assert!(is_check(&position));
        assert_eq!(classify(&position), GameResult::Ongoing);
    }

    #[test]
    fn fifty_move_threshold() {
        let at_99 = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 60").unwrap();
        assert_eq!(classify(&at_99), GameResult::Ongoing);
        let at_100 = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 60").unwrap();
        assert_eq!(classify(&at_100), GameResult::FiftyMoveDraw);
    }

    #[test]
    fn mate_beats_fifty_move_rule() {
        let position = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 120 90").unwrap();
        assert_eq!(classify(&position), GameResult::Checkmate(Color::Black));
    }

    #[test]
    fn extreme_clocks_classify_without_overflow() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 1").unwrap();
        assert_eq!(classify(&position), GameResult::FiftyMoveDraw);
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 4294967295").unwrap();
        assert_eq!(classify(&position), GameResult::Ongoing);
        assert!(!generate_moves(&position).is_empty());
    }

    #[test]
    fn human_move_must_be_legal() {
        let position = Position::initial();
        assert!(apply_human_move(&position, sq("e2"), sq("e5")).is_none());
        assert!(apply_human_move(&position, sq("e7"), sq("e5")).is_none());
        assert!(apply_human_move(&position, sq("e4"), sq("e5")).is_none());
        let next = apply_human_move(&position, sq("g1"), sq("f3")).unwrap();
        assert_eq!(next.side_to_move, Color::Black);
    }

    #[test]
    fn insufficient_material() {
        for (fen, expected) in [
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KN2 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KB2 w - - 0 1", true),
            // f1 and c8 are both light squares.
            ("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1", true),
            ("1b2k3/8/8/8/8/8/8/4KB2 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/4KNN1 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false),
        ] {
            let position = Position::from_fen(fen).unwrap();
            assert_eq!(is_insufficient_material(&position), expected, "{}", fen);
        }
    }
}
