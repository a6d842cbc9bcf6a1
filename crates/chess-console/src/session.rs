//! The interactive loop: read a move, play it, redraw.

use crate::config::ConsoleConfig;
use crate::render::{self, Style};
use anyhow::Result;
use chess_core::{Coordinate, Promotion};
use chess_rules::{Bitboard, Match, MatchError};
use std::io::{BufRead, Write};

/// What the loop does after a line of input.
enum Flow {
    Continue,
    Quit,
}

/// A console game reading commands from `input` and drawing to `output`.
///
/// A line can be two squares (`e2 e4`), one square to see its moves before
/// choosing a target, or a SAN move (`Nf3`). `fen` prints the position and
/// `quit` ends the session.
pub struct Session<R, W> {
    game: Match,
    style: Style,
    highlight_moves: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Match, config: &ConsoleConfig, input: R, output: W) -> Self {
        Session {
            game,
            style: Style {
                color: config.color,
                unicode: config.unicode_pieces,
            },
            highlight_moves: config.highlight_moves,
            input,
            output,
        }
    }

    /// Runs until checkmate, `quit` or the end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw(Bitboard::EMPTY)?;
            if self.game.is_checkmate() {
                return Ok(());
            }
            let Some(line) = self.prompt("Move: ")? else {
                return Ok(());
            };
            if let Flow::Quit = self.handle(&line)? {
                return Ok(());
            }
        }
    }

    /// Consumes the session and returns the match as it stands.
    pub fn into_match(self) -> Match {
        self.game
    }

    fn draw(&mut self, highlights: Bitboard) -> Result<()> {
        write!(
            self.output,
            "\n{}",
            render::screen(&self.game, highlights, self.style)
        )?;
        Ok(())
    }

    /// Writes `text` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn handle(&mut self, line: &str) -> Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let outcome = match words[..] {
            [] => return Ok(Flow::Continue),
            ["quit"] | ["exit"] => return Ok(Flow::Quit),
            ["fen"] => {
                writeln!(self.output, "{}", self.game.to_fen())?;
                return Ok(Flow::Continue);
            }
            [source, target] => self.game.play_notation(source, target).map(|_| ()),
            [word] => match word.parse::<Coordinate>() {
                Ok(source) => match self.choose_target(source)? {
                    Some(outcome) => outcome,
                    None => return Ok(Flow::Quit),
                },
                Err(_) => self.game.play_san(word).map(|_| ()),
            },
            _ => {
                writeln!(self.output, "Error: expected a move like 'e2 e4' or 'Nf3'")?;
                return Ok(Flow::Continue);
            }
        };

        match outcome {
            Ok(()) => {
                if self.game.pending_promotion().is_some() {
                    self.choose_promotion()?;
                }
            }
            Err(err) => {
                tracing::debug!("Move '{}' rejected: {}", line, err);
                writeln!(self.output, "Error: {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Shows the destinations of `source` and reads the target square.
    /// `None` at end of input.
    fn choose_target(&mut self, source: Coordinate) -> Result<Option<Result<(), MatchError>>> {
        let destinations = match self.game.legal_destinations(source) {
            Ok(destinations) => destinations,
            Err(err) => return Ok(Some(Err(err))),
        };
        if self.highlight_moves {
            self.draw(destinations)?;
        }
        let Some(target) = self.prompt("Target: ")? else {
            return Ok(None);
        };
        let outcome = target
            .parse::<Coordinate>()
            .map_err(MatchError::from)
            .and_then(|target| self.game.play_move(source, target))
            .map(|_| ());
        Ok(Some(outcome))
    }

    /// Asks until a valid piece is given. End of input keeps the queen.
    fn choose_promotion(&mut self) -> Result<()> {
        loop {
            let Some(answer) = self.prompt("Enter piece for promotion (B/N/R/Q): ")? else {
                return Ok(());
            };
            match answer.parse::<Promotion>() {
                Ok(choice) => {
                    self.game.resolve_promotion(choice)?;
                    return Ok(());
                }
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
    }
}
