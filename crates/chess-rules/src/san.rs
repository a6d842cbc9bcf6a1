//! Standard Algebraic Notation (SAN) generation and parsing.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Qxf7#".
//!
//! Generation is split in two. [`SanFacts::capture`] reads everything it
//! needs from the board before the move is made; [`SanFacts::render`] adds
//! the check suffix once the result of the move is known.

use crate::movegen::{self, classify, pseudo_legal_moves};
use crate::Board;
use chess_core::{Color, Coordinate, Move, MoveKind, PieceKind, Promotion};
use thiserror::Error;

/// Errors from reading SAN text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,
    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// What SAN needs to know about a move, captured before the board changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanFacts {
    pub piece: PieceKind,
    pub from: Coordinate,
    pub to: Coordinate,
    pub kind: MoveKind,
    /// File, rank, or both of the source square. Empty when the move is
    /// unambiguous.
    pub disambiguation: String,
}

impl SanFacts {
    /// Reads the SAN facts of `m` from the board it is about to be played on.
    /// Returns `None` if the source square is empty.
    pub fn capture(board: &Board, m: Move, en_passant: Option<Coordinate>) -> Option<Self> {
        let piece = board.piece_at(m.from)?;
        let kind = classify(board, m)?;
        let disambiguation = if matches!(piece.kind, PieceKind::Pawn | PieceKind::King) {
            String::new()
        } else {
            disambiguation(board, m, en_passant)
        };
        Some(SanFacts {
            piece: piece.kind,
            from: m.from,
            to: m.to,
            kind,
            disambiguation,
        })
    }

    /// Writes the SAN string. Checkmate takes `#`; otherwise check takes `+`.
    pub fn render(&self, check: bool, checkmate: bool) -> String {
        let mut san = match self.kind {
            MoveKind::CastleShort => "O-O".to_string(),
            MoveKind::CastleLong => "O-O-O".to_string(),
            _ => self.render_body(),
        };
        if checkmate {
            san.push('#');
        } else if check {
            san.push('+');
        }
        san
    }

    fn render_body(&self) -> String {
        let mut san = String::new();
        if self.piece == PieceKind::Pawn {
            if self.kind.is_capture() {
                san.push(self.from.file());
                san.push('x');
            }
        } else {
            san.push(self.piece.letter());
            san.push_str(&self.disambiguation);
            if self.kind.is_capture() {
                san.push('x');
            }
        }
        san.push_str(&self.to.to_notation());
        if self.kind.is_promotion() {
            san.push_str("=Q");
        }
        san
    }
}

/// Returns the disambiguation token for a non-pawn move.
///
/// Other pieces of the same kind and side whose pseudo-legal destinations
/// include the target are the rivals. With no rival the token is empty. A
/// rival on the same file forces the rank, and rivals on both the same file
/// and the same rank force both. Otherwise the file is enough.
pub fn disambiguation(board: &Board, m: Move, en_passant: Option<Coordinate>) -> String {
    let Some(mover) = board.piece_at(m.from) else {
        return String::new();
    };
    let rivals: Vec<Coordinate> = board
        .pieces_of(mover.color)
        .filter(|&(sq, p)| sq != m.from && p.kind == mover.kind)
        .filter(|&(sq, _)| pseudo_legal_moves(board, sq, en_passant).contains(m.to))
        .map(|(sq, _)| sq)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|sq| sq.column() == m.from.column());
    let same_rank = rivals.iter().any(|sq| sq.row() == m.from.row());
    match (same_file, same_rank) {
        (true, true) => m.from.to_notation(),
        (true, false) => m.from.rank().to_string(),
        _ => m.from.file().to_string(),
    }
}

/// The parts of a SAN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSan {
    /// `O-O` or `O-O-O`.
    Castle(MoveKind),
    /// Any other move.
    Piece {
        piece: PieceKind,
        /// Source column filter, 0 for the a-file.
        from_column: Option<u8>,
        /// Source row filter, 0 for rank 8.
        from_row: Option<u8>,
        to: Coordinate,
        promotion: Option<Promotion>,
    },
}

/// Splits a SAN string into its parts. Check and annotation suffixes are
/// ignored.
pub fn parse(san: &str) -> Result<ParsedSan, SanError> {
    let text = san.trim().trim_end_matches(['+', '#', '!', '?']);
    match text {
        "" => return Err(SanError::Empty),
        "O-O" | "0-0" => return Ok(ParsedSan::Castle(MoveKind::CastleShort)),
        "O-O-O" | "0-0-0" => return Ok(ParsedSan::Castle(MoveKind::CastleLong)),
        _ => {}
    }
    let invalid = || SanError::InvalidFormat(san.to_string());

    let mut rest = text;
    let piece = match rest.chars().next().and_then(PieceKind::from_letter) {
        Some(kind) => {
            rest = &rest[1..];
            kind
        }
        None => PieceKind::Pawn,
    };

    let (rest, promotion) = match rest.split_once('=') {
        Some((body, choice)) => {
            let choice: Promotion = choice.parse().map_err(|_| invalid())?;
            (body, Some(choice))
        }
        None => (rest, None),
    };
    if promotion.is_some() && piece != PieceKind::Pawn {
        return Err(invalid());
    }

    let body: Vec<char> = rest.chars().filter(|&c| c != 'x').collect();
    if body.len() < 2 || body.len() > 4 {
        return Err(invalid());
    }
    let (hint, destination) = body.split_at(body.len() - 2);
    let to = Coordinate::from_notation(&destination.iter().collect::<String>())
        .map_err(|_| invalid())?;

    let mut from_column = None;
    let mut from_row = None;
    for &c in hint {
        match c {
            'a'..='h' if from_column.is_none() && from_row.is_none() => {
                from_column = Some(c as u8 - b'a');
            }
            '1'..='8' if from_row.is_none() => {
                from_row = Some(b'8' - c as u8);
            }
            _ => return Err(invalid()),
        }
    }

    Ok(ParsedSan::Piece {
        piece,
        from_column,
        from_row,
        to,
        promotion,
    })
}

impl ParsedSan {
    /// Returns true if `m` on `board` fits this SAN.
    pub fn matches(&self, board: &Board, m: Move) -> bool {
        let (Some(mover), Some(kind)) = (board.piece_at(m.from), classify(board, m)) else {
            return false;
        };
        match *self {
            ParsedSan::Castle(castle) => mover.kind == PieceKind::King && kind == castle,
            ParsedSan::Piece {
                piece,
                from_column,
                from_row,
                to,
                promotion,
            } => {
                mover.kind == piece
                    && m.to == to
                    && !kind.is_castling()
                    && from_column.map_or(true, |c| c == m.from.column())
                    && from_row.map_or(true, |r| r == m.from.row())
                    // A promotion without a suffix defaults to the queen.
                    && (promotion.is_none() || kind.is_promotion())
            }
        }
    }

    /// The promotion piece asked for, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        match self {
            ParsedSan::Piece { promotion, .. } => *promotion,
            ParsedSan::Castle(_) => None,
        }
    }
}

/// Finds the one legal move of `color` that `san` names, together with the
/// promotion piece it asks for.
pub fn resolve(
    board: &Board,
    color: Color,
    en_passant: Option<Coordinate>,
    san: &str,
) -> Result<(Move, Option<Promotion>), SanError> {
    let parsed = parse(san)?;
    let candidates: Vec<Move> = movegen::legal_moves(board, color, en_passant)
        .into_iter()
        .filter(|&m| parsed.matches(board, m))
        .collect();
    match candidates[..] {
        [m] => Ok((m, parsed.promotion())),
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}
