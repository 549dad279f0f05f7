//! Move application.

use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Applies the move `from`-`to` and returns the resulting position.
///
/// Castling, en passant, promotion and self-capture are all recognised from
/// the position itself. The input is never modified. Any pseudo-legal pair
/// is handled; if `from` is empty the position is returned unchanged.
pub fn apply_move(position: &Position, from: Square, to: Square) -> Position {
    let mut next = position.clone();
    let Some(mover) = next.board.take(from) else {
        return next;
    };
    let us = mover.color;
    let target = position.piece_at(to);

    if mover.kind == PieceKind::Pawn || target.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }

    // En passant: the captured pawn sits behind the target square.
    if mover.kind == PieceKind::Pawn && target.is_none() && position.en_passant == Some(to) {
        if let Some(victim) = to.offset(0, -us.pawn_direction()) {
            next.board.set(victim, None);
        }
    }

    if mover.kind == PieceKind::King {
        next.castling.remove_color(us);
        relocate_castling_rook(&mut next, from, to, us);
    }

    next.castling.remove_for_corner(from);
    next.castling.remove_for_corner(to);

    let mut placed = mover;
    if let Some(friend) = target.filter(|p| p.color == us && p.kind == mover.kind) {
        if let Some(tier) = friend.kind.next_tier() {
            placed.kind = tier;
        }
    }
    if mover.kind == PieceKind::Pawn && to.rank() == us.promotion_rank() {
        placed.kind = PieceKind::Queen;
    }

    next.en_passant = if mover.kind == PieceKind::Pawn && from.file() == to.file() {
        double_push_skip(from, to, us)
    } else {
        None
    };

    next.board.set(to, Some(placed));
    next.side_to_move = us.opposite();
    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next
}

/// A two-file king move from the home square drags the corner rook along.
fn relocate_castling_rook(next: &mut Position, from: Square, to: Square, us: Color) {
    let home = us.back_rank();
    if from.rank() != home || to.rank() != home || from.file() != 4 {
        return;
    }
    let (rook_from, rook_to) = match to.file() {
        6 => (7, 5),
        2 => (0, 3),
        _ => return,
    };
    let (Some(rook_from), Some(rook_to)) = (
        Square::from_coords(rook_from, home),
        Square::from_coords(rook_to, home),
    ) else {
        return;
    };
    let rook = Piece::new(us, PieceKind::Rook);
    if next.board.get(rook_from) == Some(rook) {
        next.board.set(rook_from, None);
        next.board.set(rook_to, Some(rook));
    }
}

/// Returns the skipped square if `from`-`to` is a two-square pawn advance.
fn double_push_skip(from: Square, to: Square, us: Color) -> Option<Square> {
    let dir = us.pawn_direction();
    if from.rank() == us.pawn_rank() && from.offset(0, 2 * dir) == Some(to) {
        from.offset(0, dir)
    } else {
        None
    }
}
