//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! FEN is only an import/export format. Positions are copied by value
//! everywhere else, so nothing inside the engine round-trips through text.

use thiserror::Error;

use crate::{Color, Piece, PieceKind, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Typed contents of a FEN record.
///
/// The engine converts this into its own position type; castling flags are
/// kept in `KQkq` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Board contents indexed by [`Square::index`].
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    /// White king-side, white queen-side, black king-side, black queen-side.
    pub castling: [bool; 4],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let board = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => match Square::from_algebraic(text) {
                Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Some(sq),
                _ => return Err(FenError::InvalidEnPassantSquare(text.to_string())),
            },
        };

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = match fields[5].parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(FenError::InvalidFullmoveNumber(fields[5].to_string())),
        };

        Ok(FenParser {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Converts the record back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.to_fen_char());

        fen.push(' ');
        if self.castling.iter().any(|&right| right) {
            for (right, c) in self.castling.iter().zip(['K', 'Q', 'k', 'q']) {
                if *right {
                    fen.push(c);
                }
            }
        } else {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        fen
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut board = [None; 64];
    for (i, row) in rows.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                if let Some(sq) = Square::from_coords(file, rank) {
                    board[sq.index() as usize] = Some(piece);
                }
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    rank + 1
                )));
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} does not describe 8 squares",
                rank + 1
            )));
        }
    }

    for color in Color::ALL {
        let king = Piece::new(color, PieceKind::King);
        let count = board.iter().filter(|p| **p == Some(king)).count();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(board)
}

fn parse_castling(castling: &str) -> Result<[bool; 4], FenError> {
    let mut rights = [false; 4];
    if castling == "-" {
        return Ok(rights);
    }
    for c in castling.chars() {
        let slot = match c {
            'K' => 0,
            'Q' => 1,
            'k' => 2,
            'q' => 3,
            _ => {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )))
            }
        };
        rights[slot] = true;
    }
    Ok(rights)
}
