//! Chess position representation.

use std::fmt;

use chess_core::{Color, FenError, FenParser, Piece, PieceKind, Square};

/// Castling rights, one independent flag per side and wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    /// Clears whichever right belongs to a rook home corner.
    ///
    /// Called for both the origin and the destination of every move, so a
    /// rook leaving its corner and a capture landing on it are both covered.
    pub fn remove_for_corner(&mut self, sq: Square) {
        match sq {
            Square::H1 => self.white_kingside = false,
            Square::A1 => self.white_queenside = false,
            Square::H8 => self.black_kingside = false,
            Square::A8 => self.black_queenside = false,
            _ => {}
        }
    }

    /// Returns true if no right is left.
    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside
            || self.white_queenside
            || self.black_kingside
            || self.black_queenside)
    }

    const fn to_array(self) -> [bool; 4] {
        [
            self.white_kingside,
            self.white_queenside,
            self.black_kingside,
            self.black_queenside,
        ]
    }

    const fn from_array(flags: [bool; 4]) -> Self {
        CastlingRights {
            white_kingside: flags[0],
            white_queenside: flags[1],
            black_kingside: flags[2],
            black_queenside: flags[3],
        }
    }
}

/// An 8x8 grid of optional pieces, addressed by [`Square`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Option<Piece>; 64]);

impl Board {
    pub const EMPTY: Board = Board([None; 64]);

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.0[sq.index() as usize] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.0[sq.index() as usize].take()
    }

    /// Iterates every occupied square with its piece, a1 to h8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.occupied()).finish()
    }
}

/// Complete chess position state.
///
/// Positions are values: every move produces a new one and nothing is
/// mutated in place once a position has been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            board: Board::EMPTY,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut position = Position::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                position.put(file as u8, color.back_rank(), Piece::new(color, kind));
                position.put(
                    file as u8,
                    color.pawn_rank(),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        position.castling = CastlingRights::ALL;
        position
    }

    fn put(&mut self, file: u8, rank: u8, piece: Piece) {
        if let Some(sq) = Square::from_coords(file, rank) {
            self.board.set(sq, Some(piece));
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut board = Board::EMPTY;
        for sq in Square::all() {
            board.set(sq, parsed.board[sq.index() as usize]);
        }
        Ok(Position {
            board,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights::from_array(parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut board = [None; 64];
        for (sq, piece) in self.board.occupied() {
            board[sq.index() as usize] = Some(piece);
        }
        FenParser {
            board,
            side_to_move: self.side_to_move,
            castling: self.castling.to_array(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Iterates the squares and pieces of one color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .occupied()
            .filter(move |(_, piece)| piece.color == color)
    }

    /// Returns true if both positions would offer the same moves: same
    /// placement, side to move, castling rights and en passant target.
    ///
    /// Clocks are ignored, which is what repetition counting needs.
    pub fn same_placement(&self, other: &Position) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Position {
    /// Renders the board from White's side, rank 8 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn initial_matches_startpos_fen() {
        assert_eq!(Position::initial().to_fen(), FenParser::STARTPOS);
        assert_eq!(
            Position::from_fen(FenParser::STARTPOS).unwrap(),
            Position::initial()
        );
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn piece_at() {
        let pos = Position::initial();
        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            pos.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
    }

    #[test]
    fn pieces_of_color() {
        let pos = Position::initial();
        assert_eq!(pos.pieces(Color::White).count(), 16);
        assert_eq!(
            pos.pieces(Color::Black)
                .filter(|(_, p)| p.kind == PieceKind::Pawn)
                .count(),
            8
        );
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.remove_color(Color::Black);
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));

        rights.remove_for_corner(Square::A1);
        assert!(rights.is_empty());
    }

    #[test]
    fn corner_squares_map_to_rights() {
        for (corner, expected) in [
            (Square::H1, CastlingRights { white_kingside: false, ..CastlingRights::ALL }),
            (Square::A1, CastlingRights { white_queenside: false, ..CastlingRights::ALL }),
            (Square::H8, CastlingRights { black_kingside: false, ..CastlingRights::ALL }),
            (Square::A8, CastlingRights { black_queenside: false, ..CastlingRights::ALL }),
            (Square::E1, CastlingRights::ALL),
        ] {
            let mut rights = CastlingRights::ALL;
            rights.remove_for_corner(corner);
            assert_eq!(rights, expected, "{}", corner);
        }
    }

    #[test]
    fn empty_position() {
        let pos = Position::empty();
        assert_eq!(pos.side_to_move, Color::White);
        assert!(pos.castling.is_empty());
        assert_eq!(pos.en_passant, None);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.board.occupied().count(), 0);
    }

    #[test]
    fn same_placement_ignores_clocks() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 12 9").unwrap();
        let c = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert!(a.same_placement(&b));
        assert!(!a.same_placement(&c));
    }

    #[test]
    fn display_board() {
        let text = Position::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
