//! Full legality on top of pseudo-legal generation.
//!
//! A candidate is applied to a copy of the board and the copy is tested.
//! The original board is never touched, so rejecting a move needs no undo.

use super::{apply_move, is_king_attacked, pseudo_legal_moves, AppliedMove};
use crate::{Board, MatchError};
use chess_core::{Color, Coordinate, Move};

/// Applies `m` to a copy of `board` and checks that the mover's king is safe.
///
/// The move must already be pseudo-legal. Any move that leaves the mover's
/// own king attacked is rejected as self-check. Castling gets the same test,
/// on the square the king lands on.
pub fn try_move(board: &Board, m: Move) -> Result<AppliedMove, MatchError> {
    let mover = board
        .piece_at(m.from)
        .ok_or(MatchError::NoPieceAtSource(m.from))?;
    let applied = apply_move(board, m).ok_or(MatchError::NoPieceAtSource(m.from))?;
    if is_king_attacked(&applied.board, mover.color) {
        return Err(MatchError::SelfCheck {
            from: m.from,
            to: m.to,
        });
    }
    Ok(applied)
}

/// Lists every fully legal move of `color`.
pub fn legal_moves(board: &Board, color: Color, en_passant: Option<Coordinate>) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces_of(color) {
        for to in pseudo_legal_moves(board, from, en_passant) {
            let m = Move::new(from, to);
            if try_move(board, m).is_ok() {
                moves.push(m);
            }
        }
    }
    moves
}

/// Returns true if `color` has at least one legal move. Stops at the first
/// one found.
pub fn has_legal_move(board: &Board, color: Color, en_passant: Option<Coordinate>) -> bool {
    board.pieces_of(color).any(|(from, _)| {
        pseudo_legal_moves(board, from, en_passant)
            .into_iter()
            .any(|to| try_move(board, Move::new(from, to)).is_ok())
    })
}

/// Returns true if `color` is in check and every pseudo-legal move it has
/// still leaves its king attacked.
pub fn is_checkmate(board: &Board, color: Color, en_passant: Option<Coordinate>) -> bool {
    is_king_attacked(board, color) && !has_legal_move(board, color, en_passant)
}
