//! Move representation.

use crate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a move, decided from the board before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Quiet move onto an empty square.
    Normal,
    /// Pawn advancing two ranks from its starting rank.
    DoubleStep,
    /// Ordinary capture on the target square.
    Capture,
    /// Pawn capturing the pawn beside it, landing on the empty square behind.
    EnPassant,
    /// King moving two columns toward the h-file rook (O-O).
    CastleShort,
    /// King moving two columns toward the a-file rook (O-O-O).
    CastleLong,
    /// Pawn reaching the last rank, with or without a capture.
    Promotion { capture: bool },
}

impl MoveKind {
    /// Returns true if the move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::Promotion { capture: true }
        )
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleShort | MoveKind::CastleLong)
    }

    /// Returns true if this is a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion { .. })
    }
}

/// A move from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Coordinate, to: Coordinate) -> Self {
        Move { from, to }
    }

    /// Parses a move in coordinate form (e.g., "e2e4").
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Coordinate::from_notation(&s[0..2]).ok()?;
        let to = Coordinate::from_notation(&s[2..4]).ok()?;
        Some(Move { from, to })
    }

    /// Returns the move in coordinate form (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
