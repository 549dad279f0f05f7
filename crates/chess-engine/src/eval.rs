//! Static evaluation from the computer's point of view.

use crate::movegen::is_king_attacked;
use crate::rules::{classify, GameResult};
use crate::Position;
use chess_core::{Color, PieceKind};

/// Piece values in centipawns
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Nominal only; kings never enter the material sum.
pub const KING_VALUE: i32 = 20_000;

/// Score of a checkmate, positive when the computer delivers it.
pub const MATE_SCORE: i32 = 100_000;

/// Bonus for giving check, penalty for standing in check.
pub const CHECK_BONUS: i32 = 20;

/// Returns the centipawn value of a piece kind.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Evaluates `position` for `computer`; positive scores favour the computer.
pub fn evaluate(position: &Position, computer: Color) -> i32 {
    evaluate_classified(position, computer, classify(position))
}

/// Evaluation for a position whose classification is already known.
pub(crate) fn evaluate_classified(position: &Position, computer: Color, result: GameResult) -> i32 {
    match result {
        GameResult::Checkmate(loser) if loser == computer => return -MATE_SCORE,
        GameResult::Checkmate(_) => return MATE_SCORE,
        GameResult::Stalemate | GameResult::FiftyMoveDraw => return 0,
        GameResult::Ongoing => {}
    }

    let mut score = 0;
    for (_, piece) in position.board.occupied() {
        if piece.kind == PieceKind::King {
            continue;
        }
        let value = piece_value(piece.kind);
        if piece.color == computer {
            score += value;
        } else {
            score -= value;
        }
    }

    let human = computer.opposite();
    if is_king_attacked(position, human) {
        score += CHECK_BONUS;
    }
    if is_king_attacked(position, computer) {
        score -= CHECK_BONUS;
    }

    score
}
