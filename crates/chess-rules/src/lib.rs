//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 grid of pieces
//! - [`Bitboard`] - sets of squares, used for destination matrices
//! - [`Match`] - turn order, legality, check, checkmate, en passant,
//!   castling, promotion and SAN history
//! - [`movegen`] - per-piece movement patterns, attack queries and perft
//! - [`san`] - Standard Algebraic Notation generation and parsing
//!
//! # Architecture
//!
//! Movement generation is pseudo-legal: it follows each piece's pattern
//! and board occupancy only. Full legality is decided by applying a move to
//! a copy of the board and checking whether the mover's king is attacked.
//! The same check backs move validation, the checkmate scan and perft.
//!
//! # Example
//!
//! ```
//! use chess_rules::Match;
//!
//! let mut game = Match::new();
//! game.play_notation("e2", "e4").unwrap();
//! game.play_san("e5").unwrap();
//! game.play_san("Nf3").unwrap();
//! assert_eq!(game.history(), ["e4", "e5", "Nf3"]);
//! ```

mod bitboard;
mod board;
mod chess_match;
mod error;
pub mod movegen;
pub mod san;
mod snapshot;

pub use bitboard::Bitboard;
pub use board::Board;
pub use chess_match::{Match, MatchState};
pub use error::{MatchError, SourceProblem};
pub use san::SanError;
pub use snapshot::MatchSnapshot;
