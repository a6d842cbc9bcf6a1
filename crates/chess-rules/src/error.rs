use chess_core::{Color, Coordinate, FenError, NotationError};
use thiserror::Error;

use crate::san::SanError;

/// Why a square cannot be moved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceProblem {
    /// Nothing stands on the square.
    Empty,
    /// The piece belongs to the side not on move.
    NotYourPiece,
    /// The piece has no destination at all.
    NoMoves,
}

impl std::fmt::Display for SourceProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SourceProblem::Empty => "there is no piece there",
            SourceProblem::NotYourPiece => "that piece belongs to the opponent",
            SourceProblem::NoMoves => "that piece has no possible moves",
        };
        f.write_str(reason)
    }
}

/// Errors returned by [`crate::Match`]. A failed call leaves the match as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    InvalidNotation(#[from] NotationError),

    #[error("no piece on {0}")]
    NoPieceAtSource(Coordinate),

    #[error("cannot move from {square}: {problem}")]
    InvalidSource {
        square: Coordinate,
        problem: SourceProblem,
    },

    #[error("the piece on {from} cannot move to {to}")]
    IllegalDestination { from: Coordinate, to: Coordinate },

    #[error("{from}{to} would leave the king in check")]
    SelfCheck { from: Coordinate, to: Coordinate },

    #[error("there is no piece to be promoted")]
    NoPromotionPending,

    #[error("the match is over, {winner} won")]
    MatchOver { winner: Color },

    #[error(transparent)]
    InvalidSan(#[from] SanError),

    #[error(transparent)]
    InvalidFen(#[from] FenError),
}
