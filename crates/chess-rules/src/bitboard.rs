//! Destination matrix over the 8x8 board.
//!
//! A bitboard is a 64-bit integer where each bit represents a square. Move
//! generation returns one per piece to mark the cells it can reach.

use chess_core::Coordinate;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A set of board squares.
///
/// Bit `n` is the coordinate with grid index `n`: bit 0 = a8, bit 7 = h8,
/// bit 63 = h1 (row-major, row 0 is rank 8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// No squares set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_coordinate(sq: Coordinate) -> Self {
        Bitboard(1u64 << sq.index())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Number of squares set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Coordinate) -> bool {
        self.0 & Self::from_coordinate(sq).0 != 0
    }

    #[inline]
    pub fn set(&mut self, sq: Coordinate) {
        self.0 |= Self::from_coordinate(sq).0;
    }

    /// The destination matrix indexed `[row][column]`, row 0 at rank 8.
    pub fn to_matrix(self) -> [[bool; 8]; 8] {
        let mut matrix = [[false; 8]; 8];
        for sq in self {
            matrix[sq.row() as usize][sq.column() as usize] = true;
        }
        matrix
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

impl FromIterator<Coordinate> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::EMPTY, |mut bb, sq| {
            bb.set(sq);
            bb
        })
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares: Vec<Coordinate> = self.into_iter().collect();
        f.debug_tuple("Bitboard").field(&squares).finish()
    }
}

/// Iterator over the set squares, a8 first and h1 last.
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Coordinate::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Coordinate;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        Squares(self.0)
    }
}
