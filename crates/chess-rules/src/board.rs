//! The 8x8 grid of piece occupants.

use crate::Bitboard;
use chess_core::{placement_field, Color, Coordinate, Piece, PieceKind};

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 board holding at most one piece per cell.
///
/// The board knows nothing about rules. It is `Copy`, so speculative moves
/// are tried on a copy and the original is left untouched.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates a board with the standard initial setup.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (column, kind) in BACK_RANK.into_iter().enumerate() {
            let column = column as u8;
            for color in [Color::White, Color::Black] {
                board.place(
                    Piece::new(kind, color),
                    grid(color.back_row(), column),
                );
                board.place(
                    Piece::new(PieceKind::Pawn, color),
                    grid(color.pawn_row(), column),
                );
            }
        }
        board
    }

    /// Puts a piece on a square, overwriting whatever stood there.
    ///
    /// The previous occupant is not returned; call [`Board::remove`] first if
    /// it is still needed.
    #[inline]
    pub fn place(&mut self, piece: Piece, at: Coordinate) {
        self.cells[at.index() as usize] = Some(piece);
    }

    /// Takes the piece off a square.
    #[inline]
    pub fn remove(&mut self, at: Coordinate) -> Option<Piece> {
        self.cells[at.index() as usize].take()
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, at: Coordinate) -> Option<Piece> {
        self.cells[at.index() as usize]
    }

    /// Returns a mutable reference to the piece on a square.
    #[inline]
    pub fn piece_at_mut(&mut self, at: Coordinate) -> Option<&mut Piece> {
        self.cells[at.index() as usize].as_mut()
    }

    /// Returns true if a piece stands on the square.
    #[inline]
    pub fn is_occupied(&self, at: Coordinate) -> bool {
        self.cells[at.index() as usize].is_some()
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn occupant_color(&self, at: Coordinate) -> Option<Color> {
        self.piece_at(at).map(|p| p.color)
    }

    /// Iterates over occupied squares in grid order (a8 first).
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        Coordinate::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares and pieces of one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the squares occupied by one side.
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces_of(color).map(|(sq, _)| sq).collect()
    }

    /// Returns the square of the given side's king.
    pub fn king(&self, color: Color) -> Option<Coordinate> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Returns the cells as an 8x8 matrix indexed `[row][column]`.
    pub fn to_matrix(&self) -> [[Option<Piece>; 8]; 8] {
        let mut matrix = [[None; 8]; 8];
        for (sq, piece) in self.pieces() {
            matrix[sq.row() as usize][sq.column() as usize] = Some(piece);
        }
        matrix
    }

    /// Returns the FEN piece placement field for this board.
    pub fn placement_fen(&self) -> String {
        let mut chars = [None; 64];
        for (sq, piece) in self.pieces() {
            chars[sq.index() as usize] = Some(piece.fen_char());
        }
        placement_field(&chars)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.placement_fen())
    }
}

fn grid(row: u8, column: u8) -> Coordinate {
    Coordinate::from_grid(row, column).expect("setup squares are on the board")
}
