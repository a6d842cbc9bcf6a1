//! Text rendering of a match for the terminal.

use chess_core::{Color, Coordinate, Piece, PieceKind};
use chess_rules::{Bitboard, Board, Match};
use std::fmt::Write;

const RESET: &str = "\u{1b}[0m";
const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const YELLOW: &str = "\u{1b}[33m";
const CYAN: &str = "\u{1b}[36m";
const WHITE: &str = "\u{1b}[37m";
const BLUE_BACKGROUND: &str = "\u{1b}[44m";

const SEPARATOR: &str = "  +---+---+---+---+---+---+---+---+";
const FILES: &str = "    a   b   c   d   e   f   g   h";

/// How the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Use ANSI colour codes.
    pub color: bool,
    /// Use Unicode chess symbols instead of FEN letters.
    pub unicode: bool,
}

impl Style {
    /// Plain ASCII with no escape codes.
    pub const PLAIN: Style = Style {
        color: false,
        unicode: false,
    };

    fn paint(self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn symbol(piece: Piece, unicode: bool) -> char {
    if !unicode {
        return piece.fen_char();
    }
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

fn cell(piece: Option<Piece>, highlighted: bool, style: Style) -> String {
    let text = piece.map_or(' ', |p| symbol(p, style.unicode)).to_string();
    let text = match piece.map(|p| p.color) {
        Some(Color::White) => style.paint(WHITE, &text),
        Some(Color::Black) => style.paint(YELLOW, &text),
        None => text,
    };
    match (highlighted, style.color) {
        (false, _) => text,
        (true, true) => format!("{BLUE_BACKGROUND}{text}{RESET}"),
        // Without colour a free target shows as a dot.
        (true, false) if piece.is_none() => ".".to_string(),
        (true, false) => text,
    }
}

/// Draws the board with rank 8 at the top. Squares in `highlights` get a
/// blue background, or a dot on an empty square when colour is off.
pub fn board(board: &Board, highlights: Bitboard, style: Style) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}");
    for (row, cells) in board.to_matrix().iter().enumerate() {
        let rank = 8 - row;
        let _ = write!(out, "{} ", style.paint(GREEN, &rank.to_string()));
        for (column, piece) in cells.iter().enumerate() {
            let highlighted = Coordinate::from_grid(row as u8, column as u8)
                .is_ok_and(|sq| highlights.contains(sq));
            let _ = write!(out, "| {} ", cell(*piece, highlighted, style));
        }
        let _ = writeln!(out, "|");
        let _ = writeln!(out, "{SEPARATOR}");
    }
    let _ = writeln!(out, "{}", style.paint(GREEN, FILES));
    out
}

/// Numbers the SAN history in pairs: `1.e4 e5 2.Nf3`.
pub fn history(moves: &[String]) -> String {
    let mut out = String::new();
    for (i, san) in moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i % 2 == 0 {
            let _ = write!(out, "{}.", i / 2 + 1);
        }
        out.push_str(san);
    }
    out
}

fn piece_list(pieces: &[Piece], unicode: bool) -> String {
    pieces
        .iter()
        .map(|p| symbol(*p, unicode).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lists what each side has taken.
pub fn captured(game: &Match, style: Style) -> String {
    let by_white = piece_list(&game.captured_by(Color::White), style.unicode);
    let by_black = piece_list(&game.captured_by(Color::Black), style.unicode);
    format!(
        "Captured by White: {}\nCaptured by Black: {}\n",
        style.paint(YELLOW, &by_white),
        style.paint(WHITE, &by_black)
    )
}

/// Turn, side to move, check and result lines.
pub fn status(game: &Match, style: Style) -> String {
    let mut out = format!("Turn: {}\n", game.turn());
    match game.winner() {
        Some(winner) => {
            let _ = writeln!(out, "{}", style.paint(GREEN, "CHECKMATE!"));
            let _ = writeln!(out, "Winner: {winner}");
        }
        None => {
            let _ = writeln!(out, "Waiting for player: {}", game.side_to_move());
            if game.is_check() {
                let _ = writeln!(out, "{}", style.paint(RED, "CHECK!"));
            }
        }
    }
    out
}

/// The full screen: board, history, captured pieces and status.
pub fn screen(game: &Match, highlights: Bitboard, style: Style) -> String {
    let mut out = board(game.board(), highlights, style);
    out.push('\n');
    if !game.history().is_empty() {
        let _ = writeln!(
            out,
            "{} {}\n",
            style.paint(CYAN, "Moves:"),
            history(game.history())
        );
    }
    out.push_str(&captured(game, style));
    out.push('\n');
    out.push_str(&status(game, style));
    out
}
