//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine and
//! its front ends:
//! - [`Coordinate`] for board squares, convertible between notation (`"e4"`)
//!   and the internal row/column grid
//! - [`Color`], [`PieceKind`], and [`Piece`] for piece representation
//! - [`Promotion`] for the pieces a pawn may become
//! - [`Move`] and [`MoveKind`] for move representation
//! - FEN parsing and serialization

mod color;
mod coordinate;
mod fen;
mod mov;
mod piece;

pub use color::Color;
pub use coordinate::{Coordinate, NotationError};
pub use fen::{placement_field, CastlingAvailability, FenError, FenParser};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind, Promotion, PromotionError};
