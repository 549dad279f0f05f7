//! Attack detection for all piece kinds.
//!
//! Attacks are computed by scanning the attacking side's pieces and testing
//! each against the target square, so the oracle works on any position,
//! including scratch positions built during legality checks.

use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Knight move offsets as (file, rank) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King move offsets as (file, rank) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Ray directions for a sliding piece kind; empty for non-sliders.
pub(crate) fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN: [(i8, i8); 8] = [
        (0, 1),
        (1, 0),
        (0, -1),
        (-1, 0),
        (1, 1),
        (1, -1),
        (-1, -1),
        (-1, 1),
    ];
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN,
        _ => &[],
    }
}

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    position
        .pieces(by_color)
        .any(|(from, piece)| attacks_square(position, from, piece, sq))
}

/// Returns true if `piece` standing on `from` threatens `target`.
///
/// Pawns threaten only their two forward diagonals; sliders are stopped by
/// the first occupied square on the ray.
pub fn attacks_square(position: &Position, from: Square, piece: Piece, target: Square) -> bool {
    if from == target {
        return false;
    }
    let df = target.file() as i8 - from.file() as i8;
    let dr = target.rank() as i8 - from.rank() as i8;

    match piece.kind {
        PieceKind::Pawn => dr == piece.color.pawn_direction() && df.abs() == 1,
        PieceKind::Knight => KNIGHT_OFFSETS.contains(&(df, dr)),
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
        PieceKind::Bishop => df.abs() == dr.abs() && ray_is_clear(position, from, df, dr),
        PieceKind::Rook => (df == 0 || dr == 0) && ray_is_clear(position, from, df, dr),
        PieceKind::Queen => {
            (df == 0 || dr == 0 || df.abs() == dr.abs()) && ray_is_clear(position, from, df, dr)
        }
    }
}

/// Walks from `from` toward `from + (df, dr)` along a straight or diagonal
/// line and reports whether every square strictly between is empty.
fn ray_is_clear(position: &Position, from: Square, df: i8, dr: i8) -> bool {
    let step = (df.signum(), dr.signum());
    let distance = df.abs().max(dr.abs());
    let mut current = from;
    for _ in 1..distance {
        current = match current.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        if position.piece_at(current).is_some() {
            return false;
        }
    }
    true
}

/// Returns the square of the given color's king, if it has one.
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    let king = Piece::new(color, PieceKind::King);
    position
        .pieces(color)
        .find(|(_, piece)| *piece == king)
        .map(|(sq, _)| sq)
}

/// Returns true if the king of the given color is in check.
///
/// A position without that king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match king_square(position, king_color) {
        Some(sq) => is_square_attacked(position, sq, king_color.opposite()),
        None => false,
    }
}
