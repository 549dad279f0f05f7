//! The interactive loop: commands in, board and status lines out.

use crate::command::{Command, HELP};
use chess_core::Square;
use chess_engine::movegen::perft::perft;
use chess_engine::{DrawReason, Game, GameError, GameStatus, Searcher};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

/// One human-versus-computer session.
pub struct Session {
    game: Game,
    searcher: Searcher,
    reply_delay: Duration,
}

impl Session {
    pub fn new(game: Game, searcher: Searcher, reply_delay: Duration) -> Self {
        Session {
            game,
            searcher,
            reply_delay,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.show(out)?;
        self.reply(out)?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if !self.handle(command, out)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "{}", e)?,
            }
        }
        Ok(())
    }

    /// Executes one command. Returns false when the session should end.
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Move { from, to } => match self.game.play_human(from, to) {
                Ok(_) => {
                    self.show(out)?;
                    self.reply(out)?;
                }
                Err(GameError::IllegalMove { .. }) => writeln!(out, "Illegal move.")?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Moves(square) => self.list_moves(square, out)?,
            Command::Undo => {
                if self.game.undo() {
                    self.show(out)?;
                    self.reply(out)?;
                } else {
                    writeln!(out, "Nothing to undo.")?;
                }
            }
            Command::New => {
                self.game.reset();
                self.show(out)?;
                self.reply(out)?;
            }
            Command::Board => self.show(out)?,
            Command::Fen => writeln!(out, "{}", self.game.to_fen())?,
            Command::Perft(depth) => {
                let start = Instant::now();
                let nodes = perft(self.game.position(), depth);
                tracing::info!(depth, nodes, elapsed = ?start.elapsed(), "perft");
                writeln!(out, "perft({}) = {}", depth, nodes)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn list_moves<W: Write>(&self, square: Square, out: &mut W) -> io::Result<()> {
        let mut targets = self.game.legal_moves(square);
        if targets.is_empty() {
            return writeln!(out, "No legal moves from {}.", square);
        }
        targets.sort();
        let names: Vec<String> = targets.iter().map(|sq| sq.to_algebraic()).collect();
        writeln!(out, "{}: {}", square, names.join(" "))
    }

    /// Plays the computer's move if it is due, after the reply delay.
    fn reply<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.game.awaiting_computer() {
            return Ok(());
        }
        if !self.reply_delay.is_zero() {
            thread::sleep(self.reply_delay);
        }
        if let Some(m) = self.game.play_computer(&mut self.searcher) {
            writeln!(out, "Computer plays {}", m)?;
            self.show(out)?;
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.game.position())?;
        writeln!(out, "{}", status_line(&self.game))
    }
}

/// Human-readable status of the game.
pub fn status_line(game: &Game) -> String {
    match game.status() {
        GameStatus::Checkmate(loser) => format!("Checkmate! {} wins.", loser.opposite()),
        GameStatus::Draw(DrawReason::Stalemate) => "Stalemate. Draw.".to_string(),
        GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
            "Threefold repetition. Draw.".to_string()
        }
        GameStatus::Draw(DrawReason::InsufficientMaterial) => {
            "Insufficient material. Draw.".to_string()
        }
        GameStatus::Draw(DrawReason::FiftyMoveRule) => "Draw by the fifty-move rule.".to_string(),
        GameStatus::Ongoing => {
            let side = game.position().side_to_move;
            let who = if side == game.human() { "you" } else { "computer" };
            if game.is_check() {
                format!("{} to move ({}), check.", side, who)
            } else {
                format!("{} to move ({}).", side, who)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;
    use chess_engine::{Position, SearchConfig};

    fn session(human: Color) -> Session {
        let searcher = Searcher::seeded(human.opposite(), SearchConfig::new(1), 17);
        Session::new(Game::new(human), searcher, Duration::ZERO)
    }

    fn run(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn move_gets_a_reply() {
        let mut session = session(Color::White);
        let out = run(&mut session, "e2e4\n");
        assert!(out.contains("Computer plays"));
        assert_eq!(session.game().history().len(), 2);
        assert!(out.contains("White to move (you)."));
    }

    #[test]
    fn illegal_move_is_reported() {
        let mut session = session(Color::White);
        let out = run(&mut session, "e2e5\n");
        assert!(out.contains("Illegal move."));
        assert_eq!(session.game().position(), &Position::initial());
    }

    #[test]
    fn computer_opens_as_white() {
        let mut session = session(Color::Black);
        let out = run(&mut session, "");
        assert!(out.contains("Computer plays"));
        assert_eq!(session.game().position().side_to_move, Color::Black);
    }

    #[test]
    fn undo_and_quit() {
        let mut session = session(Color::White);
        let out = run(&mut session, "e2e4\nundo\nquit\ne2e4\n");
        assert_eq!(session.game().position(), &Position::initial());
        assert_eq!(out.matches("Computer plays").count(), 1);

        let out = run(&mut session, "undo\n");
        assert!(out.contains("Nothing to undo."));
    }

    #[test]
    fn undo_past_computer_opening_replays_it() {
        let mut session = session(Color::Black);
        let out = run(&mut session, "undo\ne7e5\n");
        assert_eq!(out.matches("Computer plays").count(), 3);
        assert!(!out.contains("not the human's turn"));
        assert_eq!(session.game().history().len(), 3);
        assert_eq!(session.game().position().side_to_move, Color::Black);
    }

    #[test]
    fn list_moves_and_fen() {
        let mut session = session(Color::White);
        let out = run(&mut session, "moves g1\nmoves e5\nfen\nperft 1\nbogus\n");
        assert!(out.contains("g1: f3 h3"));
        assert!(out.contains("No legal moves from e5."));
        assert!(out.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
        assert!(out.contains("perft(1) = 20"));
        assert!(out.contains("unknown command 'bogus'"));
    }

    #[test]
    fn status_lines() {
        let mate = Game::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1", Color::White).unwrap();
        assert_eq!(status_line(&mate), "Checkmate! White wins.");
        let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Color::White).unwrap();
        assert_eq!(status_line(&stalemate), "Stalemate. Draw.");
        let check = Game::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1", Color::White).unwrap();
        assert_eq!(status_line(&check), "Black to move (computer), check.");
    }
}
