//! Parsing of the line-oriented commands typed at the prompt.

use chess_core::{Move, ParseSquareError, Square};
use thiserror::Error;

/// Deepest `perft` the prompt will run; larger requests are clamped.
pub const MAX_PERFT_DEPTH: u32 = 4;

/// A command read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A coordinate move such as `e2e4`.
    Move { from: Square, to: Square },
    /// List legal destinations for a square.
    Moves(Square),
    Undo,
    New,
    Board,
    Fen,
    Perft(u32),
    Help,
    Quit,
}

/// Error returned for input that is not a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    InvalidSquare(#[from] ParseSquareError),
    #[error("invalid depth '{0}'")]
    InvalidDepth(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "moves" => {
                let square = arg.ok_or(CommandError::MissingArgument("moves"))?;
                Command::Moves(square.to_ascii_lowercase().parse()?)
            }
            "undo" => Command::Undo,
            "new" => Command::New,
            "board" => Command::Board,
            "fen" => Command::Fen,
            "perft" => {
                let depth = arg.ok_or(CommandError::MissingArgument("perft"))?;
                let depth: u32 = depth
                    .parse()
                    .map_err(|_| CommandError::InvalidDepth(depth.to_string()))?;
                Command::Perft(depth.min(MAX_PERFT_DEPTH))
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => match Move::from_uci(other) {
                Some(m) => Command::Move {
                    from: m.from,
                    to: m.to,
                },
                None => return Err(CommandError::Unknown(head.to_string())),
            },
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  e2e4          move a piece (pawns always promote to a queen)
  moves <sq>    list legal destinations of the piece on <sq>
  undo          take back your last move and the computer's reply
  new           start a new game
  board         show the board
  fen           print the position as FEN
  perft <n>     count leaf nodes to depth <n> (at most 4)
  help          show this text
  quit          leave";
