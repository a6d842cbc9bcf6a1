//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Color, Coordinate, PieceKind};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Castling availability as written in the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingAvailability {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastlingAvailability {
    /// Returns whether the side may still castle short.
    pub const fn short(self, color: Color) -> bool {
        match color {
            Color::White => self.white_short,
            Color::Black => self.black_short,
        }
    }

    /// Returns whether the side may still castle long.
    pub const fn long(self, color: Color) -> bool {
        match color {
            Color::White => self.white_long,
            Color::Black => self.black_long,
        }
    }

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = CastlingAvailability::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let flag = match c {
                'K' => &mut rights.white_short,
                'Q' => &mut rights.white_long,
                'k' => &mut rights.black_short,
                'q' => &mut rights.black_long,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if *flag {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            *flag = true;
        }
        Ok(rights)
    }
}

impl std::fmt::Display for CastlingAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = [
            (self.white_short, 'K'),
            (self.white_long, 'Q'),
            (self.black_short, 'k'),
            (self.black_long, 'q'),
        ];
        let text: String = flags.iter().filter(|(on, _)| *on).map(|(_, c)| *c).collect();
        if text.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", text)
        }
    }
}

/// Parsed and validated FEN data.
///
/// The rules crate turns this into a match; this type only guarantees that
/// every field is well-formed and that each side has exactly one king.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Occupied squares with the piece standing on them, in grid order.
    pub placement: Vec<(Coordinate, PieceKind, Color)>,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability.
    pub castling: CastlingAvailability,
    /// En passant target square (the square behind a pawn that just moved two).
    pub en_passant: Option<Coordinate>,
    /// Halfmove clock. Parsed for completeness; nothing enforces the fifty-move rule.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active, castling, en_passant, halfmove, fullmove] = parts[..] else {
            return Err(FenError::InvalidPartCount(parts.len()));
        };

        let placement = Self::parse_placement(placement)?;

        let active_color = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingAvailability::parse(castling)?;
        let en_passant = Self::parse_en_passant(en_passant)?;

        let halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?;

        let fullmove_number = fullmove
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(fullmove.to_string()))?;

        Ok(FenParser {
            placement,
            active_color,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<Vec<(Coordinate, PieceKind, Color)>, FenError> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placement = Vec::new();
        let mut kings = [0u32; 2];
        // FEN lists rank 8 first, which is grid row 0.
        for (row, rank) in ranks.iter().enumerate() {
            let mut column = 0u32;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    column += skip;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let square = u8::try_from(column)
                        .ok()
                        .and_then(|col| Coordinate::from_grid(row as u8, col).ok())
                        .ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "rank {} has more than 8 squares",
                                8 - row
                            ))
                        })?;
                    if kind == PieceKind::King {
                        kings[color.index()] += 1;
                    }
                    placement.push((square, kind, color));
                    column += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if column != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    column
                )));
            }
        }

        for color in [Color::White, Color::Black] {
            if kings[color.index()] != 1 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "{} has {} kings, expected exactly 1",
                    color,
                    kings[color.index()]
                )));
            }
        }

        Ok(placement)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Coordinate>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Coordinate::from_notation(field) {
            Ok(square) if square.rank() == 3 || square.rank() == 6 => Ok(Some(square)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut grid = [None; 64];
        for &(square, kind, color) in &self.placement {
            grid[square.index() as usize] = Some(kind.to_fen_char(color));
        }
        format!(
            "{} {} {} {} {} {}",
            placement_field(&grid),
            match self.active_color {
                Color::White => 'w',
                Color::Black => 'b',
            },
            self.castling,
            self.en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_notation()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

/// Writes the piece placement field from a grid of FEN characters in grid
/// order (a8 first).
pub fn placement_field(grid: &[Option<char>; 64]) -> String {
    let mut field = String::new();
    for (row, cells) in grid.chunks(8).enumerate() {
        if row > 0 {
            field.push('/');
        }
        let mut empty = 0;
        for cell in cells {
            match cell {
                Some(c) => {
                    if empty > 0 {
                        field.push_str(&empty.to_string());
                        empty = 0;
                    }
                    field.push(*c);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            field.push_str(&empty.to_string());
        }
    }
    field
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling.to_string(), "KQkq");
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.placement.len(), 32);
        assert_eq!(
            fen.placement[0],
            (
                Coordinate::from_notation("a8").unwrap(),
                PieceKind::Rook,
                Color::Black
            )
        );
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenParser::parse(original).unwrap();
        assert_eq!(parsed.en_passant, Coordinate::from_notation("e3").ok());
        assert_eq!(parsed.to_fen(), original);
        assert_eq!(FenParser::default().to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn invalid_part_count_and_color() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        for fen in [
            "8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            "4k3/8/8/8/8/8/8/0K6 w - - 0 1",
        ] {
            assert!(
                matches!(FenParser::parse(fen), Err(FenError::InvalidPiecePlacement(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn castling_fields() {
        let fen = FenParser::parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(fen.castling.short(Color::White));
        assert!(!fen.castling.long(Color::White));
        assert!(!fen.castling.short(Color::Black));
        assert!(fen.castling.long(Color::Black));
        assert_eq!(fen.castling.to_string(), "Kq");

        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w KK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for field in ["abc", "x3", "e4"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - {} 0 1", field);
            assert!(matches!(
                FenParser::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 0"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn placement_field_compresses_empty_squares() {
        let mut grid = [None; 64];
        grid[4] = Some('k');
        grid[60] = Some('K');
        assert_eq!(placement_field(&grid), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains('3'));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
