//! Board coordinate representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when text or grid indices do not name a board square.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid coordinate '{0}': expected a file a-h followed by a rank 1-8")]
    InvalidNotation(String),
}

/// A square on the 8x8 board.
///
/// Stored as a grid index in row-major order where row 0 is rank 8
/// (Black's back rank) and column 0 is the a-file:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
///
/// The human notation maps as `row = 8 - rank` and `column = file - 'a'`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate(u8);

impl Coordinate {
    /// Number of rows and columns on the board.
    pub const SIZE: u8 = 8;

    /// Creates a coordinate from grid row and column.
    pub fn from_grid(row: u8, column: u8) -> Result<Self, NotationError> {
        if row < Self::SIZE && column < Self::SIZE {
            Ok(Coordinate(row * Self::SIZE + column))
        } else {
            Err(NotationError::InvalidNotation(format!("({row}, {column})")))
        }
    }

    /// Creates a coordinate from a grid index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Coordinate(index))
        } else {
            None
        }
    }

    /// Parses a coordinate from notation such as `"e4"`.
    pub fn from_notation(text: &str) -> Result<Self, NotationError> {
        let invalid = || NotationError::InvalidNotation(text.to_string());
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        let column = file as u8 - b'a';
        let row = Self::SIZE - (rank as u8 - b'0');
        Ok(Coordinate(row * Self::SIZE + column))
    }

    /// Returns the grid index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the grid row (0 is rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / Self::SIZE
    }

    /// Returns the grid column (0 is the a-file).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % Self::SIZE
    }

    /// Returns the file letter, `'a'` to `'h'`.
    #[inline]
    pub const fn file(self) -> char {
        (b'a' + self.column()) as char
    }

    /// Returns the rank number, 1 to 8.
    #[inline]
    pub const fn rank(self) -> u8 {
        Self::SIZE - self.row()
    }

    /// Returns the coordinate shifted by the given row and column deltas,
    /// or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let column = self.column() as i8 + d_column;
        if row < 0 || row >= Self::SIZE as i8 || column < 0 || column >= Self::SIZE as i8 {
            None
        } else {
            Some(Coordinate(row as u8 * Self::SIZE + column as u8))
        }
    }

    /// Returns the notation for this coordinate, e.g. `"e4"`.
    pub fn to_notation(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Iterates over all 64 coordinates in grid order (a8 first).
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..64).map(Coordinate)
    }
}

impl FromStr for Coordinate {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_notation()
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({})", self.to_notation())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
