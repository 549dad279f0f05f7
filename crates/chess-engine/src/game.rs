//! Human-versus-computer game management with undo.
//!
//! The [`Game`] struct owns the current position and a [`History`] of the
//! positions before it. It adds the draw conditions that need more than a
//! single position (threefold repetition) or that the position classifier
//! leaves out (insufficient material).

use crate::history::History;
use crate::movegen::{apply_move, is_king_attacked, legal_moves};
use crate::rules::{classify, is_insufficient_material, DrawReason, GameResult};
use crate::search::Searcher;
use crate::Position;
use chess_core::{Color, FenError, Move, Square};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// The computer is to move.
    #[error("it is not the human's turn")]
    NotYourTurn,
    /// The move is not legal in the current position.
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
}

/// Status of a game, including draws that depend on its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The given color is checkmated.
    Checkmate(Color),
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true if the game has ended.
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// The winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(loser) => Some(loser.opposite()),
            _ => None,
        }
    }
}

/// A game between a human and the computer.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current position.
    position: Position,
    /// Positions before the current one, oldest first.
    history: History,
    /// The human's color; the computer plays the other.
    human: Color,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Color::White)
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new(human: Color) -> Self {
        Self::from_position(Position::initial(), human)
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position, human: Color) -> Self {
        Game {
            position,
            history: History::new(),
            human,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str, human: Color) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?, human))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn computer(&self) -> Color {
        self.human.opposite()
    }

    /// Legal destinations for the piece on `square`.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        legal_moves(&self.position, square)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_attacked(&self.position, self.position.side_to_move)
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Plays the human's move and returns the resulting status.
    ///
    /// On error nothing changes.
    pub fn play_human(&mut self, from: Square, to: Square) -> Result<GameStatus, GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if self.position.side_to_move != self.human {
            return Err(GameError::NotYourTurn);
        }
        if !legal_moves(&self.position, from).contains(&to) {
            debug!(%from, %to, "rejected illegal move");
            return Err(GameError::IllegalMove { from, to });
        }

        self.commit(from, to);
        Ok(self.status())
    }

    /// Returns true if the game goes on and the computer is to move.
    pub fn awaiting_computer(&self) -> bool {
        self.position.side_to_move == self.computer() && !self.status().is_over()
    }

    /// Lets `searcher` pick and play the computer's reply.
    ///
    /// Returns `None`, changing nothing, when the computer is not to move.
    pub fn play_computer<R: Rng>(&mut self, searcher: &mut Searcher<R>) -> Option<Move> {
        if !self.awaiting_computer() {
            return None;
        }
        if searcher.computer() != self.computer() {
            searcher.set_computer(self.computer());
        }

        let m = searcher.best_move(&self.position)?;
        self.commit(m.from, m.to);
        Some(m)
    }

    fn commit(&mut self, from: Square, to: Square) {
        let next = apply_move(&self.position, from, to);
        let previous = std::mem::replace(&mut self.position, next);
        self.history.push(previous);
        debug!(mover = %self.position.side_to_move.opposite(), %from, %to, "move played");

        let status = self.status();
        if status.is_over() {
            info!(?status, fen = %self.position.to_fen(), "game over");
        }
    }

    /// Takes back the last move, and the one before it when that hands the
    /// turn back to the human. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.position = previous;

        if self.position.side_to_move != self.human {
            if let Some(earlier) = self.history.pop() {
                self.position = earlier;
            }
        }
        debug!(plies = self.history.len(), "undo");
        true
    }

    /// Starts over from the standard starting position.
    pub fn reset(&mut self) {
        self.position = Position::initial();
        self.history.clear();
        info!(human = %self.human, "new game");
    }

    /// Counts how many times the current position has occurred, this
    /// occurrence included.
    pub fn position_count(&self) -> usize {
        1 + self
            .history
            .iter()
            .filter(|p| p.same_placement(&self.position))
            .count()
    }

    /// Returns the status of the game.
    ///
    /// Checkmate and stalemate come first, then repetition, insufficient
    /// material and the fifty-move rule.
    pub fn status(&self) -> GameStatus {
        let result = classify(&self.position);
        match result {
            GameResult::Checkmate(loser) => GameStatus::Checkmate(loser),
            GameResult::Stalemate => GameStatus::Draw(DrawReason::Stalemate),
            _ if self.position_count() >= 3 => GameStatus::Draw(DrawReason::ThreefoldRepetition),
            _ if is_insufficient_material(&self.position) => {
                GameStatus::Draw(DrawReason::InsufficientMaterial)
            }
            GameResult::FiftyMoveDraw => GameStatus::Draw(DrawReason::FiftyMoveRule),
            GameResult::Ongoing => GameStatus::Ongoing,
        }
    }
}
