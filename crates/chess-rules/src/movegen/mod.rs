//! Pseudo-legal move generation and move application.
//!
//! Generation only looks at piece patterns and board occupancy. It never
//! asks whether the mover's own king ends up attacked; [`try_move`]
//! answers that by applying the move to a copy of the board with
//! [`apply_move`] and testing the result.

mod attacks;
mod legal;
pub mod perft;

use crate::{Bitboard, Board};
use chess_core::{Color, Coordinate, Move, MoveKind, Piece, PieceKind};

pub use attacks::{
    bishop_attacks, castling_targets, en_passant_target, king_attacks, knight_attacks,
    pawn_attacks, pawn_pushes, queen_attacks, rook_attacks,
};
pub use legal::{has_legal_move, is_checkmate, legal_moves, try_move};

/// Returns the squares the piece on `from` attacks.
///
/// Own pieces that block a line are included, since they are defended.
/// Pawns attack their forward diagonals only and castling is never an
/// attack. An empty square attacks nothing.
pub fn attacks(board: &Board, from: Coordinate) -> Bitboard {
    let Some(piece) = board.piece_at(from) else {
        return Bitboard::EMPTY;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, piece.color),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(board, from),
        PieceKind::Rook => rook_attacks(board, from),
        PieceKind::Queen => queen_attacks(board, from),
        PieceKind::King => king_attacks(from),
    }
}

/// Returns every destination the piece on `from` can reach by its movement
/// pattern, ignoring whether its own king is left attacked.
///
/// `en_passant` is the enemy pawn that advanced two ranks on the previous
/// ply, if any. An empty result means the piece cannot move; an empty
/// square yields an empty result.
pub fn pseudo_legal_moves(
    board: &Board,
    from: Coordinate,
    en_passant: Option<Coordinate>,
) -> Bitboard {
    let Some(piece) = board.piece_at(from) else {
        return Bitboard::EMPTY;
    };
    let own = board.occupied_by(piece.color);
    let enemy = board.occupied_by(piece.color.opposite());

    match piece.kind {
        PieceKind::Pawn => {
            let mut moves =
                pawn_pushes(board, from, piece.color) | (pawn_attacks(from, piece.color) & enemy);
            if let Some(target) = en_passant_target(board, from, piece.color, en_passant) {
                moves.set(target);
            }
            moves
        }
        PieceKind::King => (king_attacks(from) & !own) | castling_targets(board, from),
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            attacks(board, from) & !own
        }
    }
}

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Board, target: Coordinate, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| attacks(board, from).contains(target))
}

/// Returns true if the king of `color` stands on an attacked square.
///
/// A board without that king is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king(color)
        .is_some_and(|king| is_attacked(board, king, color.opposite()))
}

/// Classifies a move from the board before it is applied.
///
/// Returns `None` if `from` is empty. The move is assumed to follow the
/// piece's movement pattern.
pub fn classify(board: &Board, m: Move) -> Option<MoveKind> {
    let piece = board.piece_at(m.from)?;
    let capture = board.is_occupied(m.to);
    let kind = match piece.kind {
        PieceKind::King if m.from.column().abs_diff(m.to.column()) == 2 => {
            if m.to.column() > m.from.column() {
                MoveKind::CastleShort
            } else {
                MoveKind::CastleLong
            }
        }
        PieceKind::Pawn if m.to.row() == piece.color.promotion_row() => {
            MoveKind::Promotion { capture }
        }
        PieceKind::Pawn if m.from.column() != m.to.column() && !capture => MoveKind::EnPassant,
        PieceKind::Pawn if m.from.row().abs_diff(m.to.row()) == 2 => MoveKind::DoubleStep,
        _ if capture => MoveKind::Capture,
        _ => MoveKind::Normal,
    };
    Some(kind)
}

/// A move applied to a copy of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The board after the move.
    pub board: Board,
    /// What kind of move it was.
    pub kind: MoveKind,
    /// The captured piece and the square it was taken from. For en passant
    /// this is beside the target, not on it.
    pub captured: Option<(Coordinate, Piece)>,
}

/// Applies a move to a copy of `board` and returns the copy.
///
/// The mover's move count goes up by one. Castling moves the paired rook
/// too, and a pawn reaching the last rank becomes a queen. Returns `None` if
/// `from` is empty.
pub fn apply_move(board: &Board, m: Move) -> Option<AppliedMove> {
    let kind = classify(board, m)?;
    let mut next = *board;
    let mut piece = next.remove(m.from)?;
    piece.move_count = piece.move_count.saturating_add(1);

    let captured = match kind {
        MoveKind::EnPassant => {
            let victim = attacks::at(m.from, m.to.column())?;
            next.remove(victim).map(|p| (victim, p))
        }
        _ => next.remove(m.to).map(|p| (m.to, p)),
    };

    if kind.is_promotion() {
        piece.kind = PieceKind::Queen;
    }
    next.place(piece, m.to);

    let rook_move = match kind {
        MoveKind::CastleShort => Some((7, m.from.column() + 1)),
        MoveKind::CastleLong => Some((0, m.from.column() - 1)),
        _ => None,
    };
    if let Some((rook_column, rook_target)) = rook_move {
        let rook_from = attacks::at(m.from, rook_column)?;
        let rook_to = attacks::at(m.from, rook_target)?;
        if let Some(mut rook) = next.remove(rook_from) {
            rook.move_count = rook.move_count.saturating_add(1);
            next.place(rook, rook_to);
        }
    }

    Some(AppliedMove {
        board: next,
        kind,
        captured,
    })
}
