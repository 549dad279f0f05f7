//! Chess rules engine with the self-capture-and-transform variant.
//!
//! This crate provides:
//! - [`Position`] - Full game state including piece placement, castling rights, etc.
//! - Move generation and validation ([`legal_moves`], [`generate_moves`])
//! - [`apply_move`] - the transition function
//! - [`classify`] - checkmate, stalemate and fifty-move detection
//! - [`evaluate`] and [`Searcher`] - a fixed-depth alpha-beta opponent
//! - [`History`] and [`Game`] - undo and human-versus-computer play
//!
//! # Variant
//!
//! A piece may land on a friendly piece of the same kind when that kind has
//! a next tier (pawn, knight, bishop, rook). The friendly piece is removed
//! and the mover is placed as the next tier: knight, bishop, rook, queen.
//! Kings and queens never land on friendly pieces.
//!
//! # Example
//!
//! ```
//! use chess_engine::{apply_human_move, classify, GameResult, Position};
//! use chess_core::Square;
//!
//! let position = Position::initial();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let next = apply_human_move(&position, e2, e4).unwrap();
//! assert_eq!(classify(&next), GameResult::Ongoing);
//! println!("{}", next.to_fen());
//! ```

pub mod eval;
mod game;
mod history;
pub mod movegen;
mod position;
pub mod rules;
pub mod search;

pub use eval::evaluate;
pub use game::{Game, GameError, GameStatus};
pub use history::History;
pub use movegen::{
    all_legal_moves, apply_move, generate_moves, is_king_attacked, is_square_attacked,
    king_square, legal_moves, pseudo_moves, MoveList,
};
pub use position::{Board, CastlingRights, Position};
pub use rules::{apply_human_move, classify, is_insufficient_material, DrawReason, GameResult};
pub use search::{SearchConfig, Searcher, MAX_DEPTH};
