//! Move generation.
//!
//! Generation happens in two layers. [`pseudo_moves`] follows piece geometry
//! and the landing rule but ignores king safety; [`legal_moves`] simulates
//! each candidate with [`apply_move`] and keeps only those that leave the
//! mover's king unattacked.

mod apply;
mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use apply::apply_move;
pub use attacks::{attacks_square, is_king_attacked, is_square_attacked, king_square};

use attacks::{slider_directions, KING_OFFSETS, KNIGHT_OFFSETS};

/// A list of generated moves.
///
/// Storage is reserved for [`MoveList::TYPICAL_CAPACITY`] moves up front.
/// Positions set up from FEN can exceed it (many same-kind pieces that may
/// land on each other), in which case the list simply grows.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Capacity reserved by [`MoveList::new`].
    pub const TYPICAL_CAPACITY: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::TYPICAL_CAPACITY),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns true if the list holds `m`.
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Landing rule: enemies can always be captured; a friendly piece can be
/// landed on only by a mover of the same kind that has a next tier.
#[inline]
pub fn can_land_on(mover: Piece, occupant: Option<Piece>) -> bool {
    match occupant {
        None => true,
        Some(other) if other.color != mover.color => true,
        Some(other) => other.kind == mover.kind && mover.kind.next_tier().is_some(),
    }
}

/// Generates pseudo-legal destinations for the piece on `sq`.
///
/// The piece moves for its own color whatever the side to move is, and
/// king safety is not considered (except for castling's transit squares).
pub fn pseudo_moves(position: &Position, sq: Square) -> Vec<Square> {
    let mut targets = Vec::new();
    let Some(piece) = position.piece_at(sq) else {
        return targets;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_targets(position, sq, piece, &mut targets),
        PieceKind::Knight => step_targets(position, sq, piece, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::King => {
            step_targets(position, sq, piece, &KING_OFFSETS, &mut targets);
            castling_targets(position, sq, piece.color, &mut targets);
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_targets(position, sq, piece, &mut targets)
        }
    }

    targets
}

fn pawn_targets(position: &Position, from: Square, pawn: Piece, targets: &mut Vec<Square>) {
    let dir = pawn.color.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if position.piece_at(one).is_none() {
            targets.push(one);
            if from.rank() == pawn.color.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if position.piece_at(two).is_none() {
                        targets.push(two);
                    }
                }
            }
        }
    }

    // The en passant target sits on rank 6 for White captures, rank 3 for Black.
    let ep_rank = (pawn.color.pawn_rank() as i8 + 4 * dir) as u8;
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match position.piece_at(to) {
            Some(_) if can_land_on(pawn, position.piece_at(to)) => targets.push(to),
            None if position.en_passant == Some(to) && to.rank() == ep_rank => targets.push(to),
            _ => {}
        }
    }
}

fn step_targets(
    position: &Position,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if can_land_on(piece, position.piece_at(to)) {
                targets.push(to);
            }
        }
    }
}

fn slider_targets(position: &Position, from: Square, piece: Piece, targets: &mut Vec<Square>) {
    for &(df, dr) in slider_directions(piece.kind) {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            let occupant = position.piece_at(to);
            if can_land_on(piece, occupant) {
                targets.push(to);
            }
            if occupant.is_some() {
                break;
            }
            current = to;
        }
    }
}

/// Adds the king's two-square castling hops.
fn castling_targets(position: &Position, from: Square, us: Color, targets: &mut Vec<Square>) {
    let home = us.back_rank();
    if from.rank() != home || from.file() != 4 {
        return;
    }
    let them = us.opposite();
    if is_square_attacked(position, from, them) {
        return;
    }
    let rook = Piece::new(us, PieceKind::Rook);

    const KINGSIDE_GAP: &[u8] = &[5, 6];
    const QUEENSIDE_GAP: &[u8] = &[1, 2, 3];

    // (right, rook file, files that must be empty, king transit file, king target file)
    let wings: [(bool, u8, &[u8], u8, u8); 2] = [
        (position.castling.can_castle_kingside(us), 7, KINGSIDE_GAP, 5, 6),
        (position.castling.can_castle_queenside(us), 0, QUEENSIDE_GAP, 3, 2),
    ];

    for (allowed, rook_file, between, transit_file, target_file) in wings {
        if !allowed {
            continue;
        }
        let rook_home = Square::from_coords(rook_file, home);
        if rook_home.and_then(|sq| position.piece_at(sq)) != Some(rook) {
            continue;
        }
        let path_clear = between
            .iter()
            .filter_map(|&file| Square::from_coords(file, home))
            .all(|sq| position.piece_at(sq).is_none());
        if !path_clear {
            continue;
        }
        let (Some(transit), Some(target)) = (
            Square::from_coords(transit_file, home),
            Square::from_coords(target_file, home),
        ) else {
            continue;
        };
        let safe = [transit, target]
            .iter()
            .all(|&sq| !is_square_attacked(position, sq, them));
        if safe {
            targets.push(target);
        }
    }
}

/// Returns the legal destinations for the piece on `sq`.
///
/// Empty if the square is empty or holds a piece of the side not to move.
pub fn legal_moves(position: &Position, sq: Square) -> Vec<Square> {
    match position.piece_at(sq) {
        Some(piece) if piece.color == position.side_to_move => {
            legal_targets(position, sq, piece.color)
        }
        _ => Vec::new(),
    }
}

fn legal_targets(position: &Position, from: Square, us: Color) -> Vec<Square> {
    let mut targets = pseudo_moves(position, from);
    targets.retain(|&to| {
        let next = apply_move(position, from, to);
        !is_king_attacked(&next, us)
    });
    targets
}

/// Generates every legal move for `color`, as if `color` were to move.
pub fn all_legal_moves(color: Color, position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let scratch;
    let position = if position.side_to_move == color {
        position
    } else {
        scratch = Position {
            side_to_move: color,
            ..position.clone()
        };
        &scratch
    };

    for (from, _) in position.pieces(color) {
        for to in legal_targets(position, from, color) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    all_legal_moves(position.side_to_move, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn names(squares: &[Square]) -> Vec<String> {
        let mut names: Vec<String> = squares.iter().map(|s| s.to_algebraic()).collect();
        names.sort();
        names
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::new(sq("e2"), sq("e4"));
        let m2 = Move::new(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(m2));
        assert_eq!(list.into_iter().count(), 2);
    }

    #[test]
    fn crowded_position_exceeds_reserved_capacity() {
        let position =
            Position::from_fen("BQQQQBnk/Q4Qpp/Q5QB/Q6Q/Q6Q/B1Q4Q/Q6Q/KQBQQQQB w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert!(moves.len() > MoveList::TYPICAL_CAPACITY);

        let per_square: usize = Square::all()
            .map(|from| legal_moves(&position, from).len())
            .sum();
        assert_eq!(moves.len(), per_square);
    }

    #[test]
    fn generate_moves_startpos() {
        let position = Position::initial();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
        assert!(!is_king_attacked(&position, Color::White));
    }

    #[test]
    fn knight_from_g1() {
        let position = Position::initial();
        assert_eq!(names(&legal_moves(&position, sq("g1"))), ["f3", "h3"]);
    }

    #[test]
    fn empty_square_and_wrong_side() {
        let position = Position::initial();
        assert!(legal_moves(&position, sq("e4")).is_empty());
        assert!(legal_moves(&position, sq("e7")).is_empty());
        // Pseudo moves ignore the side to move.
        assert_eq!(names(&pseudo_moves(&position, sq("e7"))), ["e5", "e6"]);
    }

    #[test]
    fn landing_rule() {
        let white_rook = Piece::new(Color::White, PieceKind::Rook);
        let white_queen = Piece::new(Color::White, PieceKind::Queen);
        let black_rook = Piece::new(Color::Black, PieceKind::Rook);
        let white_bishop = Piece::new(Color::White, PieceKind::Bishop);

        assert!(can_land_on(white_rook, None));
        assert!(can_land_on(white_rook, Some(black_rook)));
        assert!(can_land_on(white_rook, Some(white_rook)));
        assert!(!can_land_on(white_rook, Some(white_bishop)));
        assert!(!can_land_on(white_queen, Some(white_queen)));
        assert!(can_land_on(white_queen, Some(black_rook)));

        let king = Piece::new(Color::Black, PieceKind::King);
        assert!(!can_land_on(king, Some(king)));
    }

    #[test]
    fn rook_may_land_on_friendly_rook() {
        let position = Position::from_fen("4k3/8/8/8/8/8/R7/R3K3 w - - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&position, sq("a1"))), ["a2", "b1", "c1", "d1"]);
    }

    #[test]
    fn pawn_may_capture_friendly_pawn_diagonally() {
        let position = Position::from_fen("4k3/8/8/8/8/4P3/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&position, sq("d2"))), ["d3", "d4", "e3"]);
        // But never forward onto it.
        let blocked = Position::from_fen("4k3/8/8/8/8/3P4/3P4/4K3 w - - 0 1").unwrap();
        assert!(legal_moves(&blocked, sq("d2")).is_empty());
    }

    #[test]
    fn queen_and_king_blocked_by_friends() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3QQ3/3QK3 w - - 0 1").unwrap();
        let king_moves = legal_moves(&position, sq("e1"));
        assert_eq!(names(&king_moves), ["f1", "f2"]);
        let queen_moves = legal_moves(&position, sq("d1"));
        assert!(!queen_moves.contains(&sq("d2")));
        assert!(!queen_moves.contains(&sq("e2")));
        assert!(!queen_moves.contains(&sq("e1")));
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let position = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&position, sq("e2"))), ["e3"]);
    }

    #[test]
    fn castling_both_wings() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&position, Square::E1)), ["c1", "d1", "f1", "g1"]);

        let black = Position {
            side_to_move: Color::Black,
            ..position
        };
        assert_eq!(names(&legal_moves(&black, Square::E8)), ["c8", "d8", "f8", "g8"]);
    }

    #[test]
    fn castling_requires_right_and_clear_path() {
        let no_rights =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&no_rights, Square::E1)), ["d1", "f1"]);

        let blocked =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/RN2K1NR w KQkq - 0 1").unwrap();
        assert_eq!(names(&legal_moves(&blocked, Square::E1)), ["d1", "f1"]);
    }

    #[test]
    fn no_castling_through_or_out_of_check() {
        // Black rook on f8 covers f1 through the open f-file.
        let through =
            Position::from_fen("4kr2/8/8/8/8/8/PPPPP1PP/R3K2R w KQ - 0 1").unwrap();
        let moves = legal_moves(&through, Square::E1);
        assert!(!moves.contains(&Square::G1));
        assert!(moves.contains(&Square::C1));

        let in_check =
            Position::from_fen("4r1k1/8/8/8/8/8/PPPP1PPP/R3K2R w KQ - 0 1").unwrap();
        let moves = legal_moves(&in_check, Square::E1);
        assert!(!moves.contains(&Square::G1));
        assert!(!moves.contains(&Square::C1));
    }

    #[test]
    fn en_passant_target_is_capturable() {
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        assert_eq!(names(&legal_moves(&position, sq("f5"))), ["e6", "f6"]);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(legal_moves(&position, sq("e2")).is_empty());
    }

    #[test]
    fn all_legal_moves_for_either_color() {
        let position = Position::initial();
        assert_eq!(all_legal_moves(Color::Black, &position).len(), 20);
        assert_eq!(all_legal_moves(Color::White, &position).len(), 20);
    }
}
