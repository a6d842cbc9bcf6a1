//! Movement patterns for each piece kind.
//!
//! Everything here works on board occupancy only. Whose turn it is and
//! whether a king is left in check are decided in [`crate::Match`].

use crate::{Bitboard, Board};
use chess_core::{Color, Coordinate, PieceKind};

/// Rook directions as (row delta, column delta).
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bishop directions as (row delta, column delta).
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Grid column the king starts on.
const KING_COLUMN: u8 = 4;

/// Walks each direction until the edge of the board or the first occupied
/// square. The blocker is included whatever its color.
fn slide(board: &Board, from: Coordinate, directions: &[(i8, i8)]) -> Bitboard {
    let mut reach = Bitboard::EMPTY;
    for &(d_row, d_column) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_column) {
            reach.set(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    reach
}

/// Every on-board square one fixed offset away.
fn jump(from: Coordinate, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(d_row, d_column)| from.offset(d_row, d_column))
        .collect()
}

/// Squares a rook on `from` attacks.
pub fn rook_attacks(board: &Board, from: Coordinate) -> Bitboard {
    slide(board, from, &ORTHOGONAL)
}

/// Squares a bishop on `from` attacks.
pub fn bishop_attacks(board: &Board, from: Coordinate) -> Bitboard {
    slide(board, from, &DIAGONAL)
}

/// Squares a queen on `from` attacks.
pub fn queen_attacks(board: &Board, from: Coordinate) -> Bitboard {
    rook_attacks(board, from) | bishop_attacks(board, from)
}

/// Squares a knight on `from` attacks.
pub fn knight_attacks(from: Coordinate) -> Bitboard {
    jump(from, &KNIGHT_JUMPS)
}

/// Squares a king on `from` attacks. Castling is not an attack.
pub fn king_attacks(from: Coordinate) -> Bitboard {
    jump(from, &KING_STEPS)
}

/// The two forward diagonals of a pawn of the given color.
pub fn pawn_attacks(from: Coordinate, color: Color) -> Bitboard {
    let forward = color.forward();
    jump(from, &[(forward, -1), (forward, 1)])
}

/// Forward steps into empty squares: one step, or two from the starting
/// row when both squares are empty.
pub fn pawn_pushes(board: &Board, from: Coordinate, color: Color) -> Bitboard {
    let mut pushes = Bitboard::EMPTY;
    let Some(one) = from.offset(color.forward(), 0).filter(|sq| !board.is_occupied(*sq)) else {
        return pushes;
    };
    pushes.set(one);
    if from.row() == color.pawn_row() {
        if let Some(two) = one.offset(color.forward(), 0).filter(|sq| !board.is_occupied(*sq)) {
            pushes.set(two);
        }
    }
    pushes
}

/// The en passant landing square for a pawn on `from`, if `vulnerable` is an
/// enemy pawn standing directly beside it.
pub fn en_passant_target(
    board: &Board,
    from: Coordinate,
    color: Color,
    vulnerable: Option<Coordinate>,
) -> Option<Coordinate> {
    let victim = vulnerable?;
    let beside = victim.row() == from.row() && victim.column().abs_diff(from.column()) == 1;
    let is_enemy_pawn = board
        .piece_at(victim)
        .is_some_and(|p| p.is(PieceKind::Pawn, color.opposite()));
    if !beside || !is_enemy_pawn {
        return None;
    }
    victim
        .offset(color.forward(), 0)
        .filter(|landing| !board.is_occupied(*landing))
}

/// The king's castling destinations.
///
/// A side may castle toward a rook when neither the king nor that rook has
/// moved and every square between them is empty. Attacked squares are not
/// looked at here.
pub fn castling_targets(board: &Board, from: Coordinate) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    let Some(king) = board.piece_at(from) else {
        return targets;
    };
    if king.kind != PieceKind::King
        || !king.is_unmoved()
        || from.row() != king.color.back_row()
        || from.column() != KING_COLUMN
    {
        return targets;
    }

    // (rook column, columns strictly between, king destination column)
    let sides: [(u8, &[u8], u8); 2] = [(7, &[5, 6], 6), (0, &[1, 2, 3], 2)];
    for (rook_column, between, destination) in sides {
        let rook_ready = at(from, rook_column)
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|rook| rook.is(PieceKind::Rook, king.color) && rook.is_unmoved());
        let path_clear = between
            .iter()
            .all(|&column| at(from, column).is_some_and(|sq| !board.is_occupied(sq)));
        if rook_ready && path_clear {
            if let Some(sq) = at(from, destination) {
                targets.set(sq);
            }
        }
    }
    targets
}

/// The square on the same row as `sq` at the given column.
pub(crate) fn at(sq: Coordinate, column: u8) -> Option<Coordinate> {
    Coordinate::from_grid(sq.row(), column).ok()
}
