//! A serialisable view of a match, for front ends and logs.

use crate::MatchState;
use chess_core::{Coordinate, Piece};
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw a match.
///
/// Built by [`crate::Match::snapshot`]. The board is indexed `[row][column]`
/// with row 0 at rank 8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub board: [[Option<Piece>; 8]; 8],
    pub fen: String,
    pub turn: u32,
    pub state: MatchState,
    pub check: bool,
    pub history: Vec<String>,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
    pub en_passant_vulnerable: Option<Coordinate>,
    pub pending_promotion: Option<Coordinate>,
}

#[cfg(test)]
mod tests {
    use crate::{Match, MatchState};
    use chess_core::{Color, PieceKind};

    #[test]
    fn snapshot_reflects_match() {
        let mut game = Match::new();
        game.play_notation("e2", "e4").unwrap();
        game.play_notation("d7", "d5").unwrap();
        game.play_notation("e4", "d5").unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.turn, 4);
        assert_eq!(snapshot.state, MatchState::InProgress(Color::Black));
        assert_eq!(snapshot.history, vec!["e4", "d5", "exd5"]);
        assert_eq!(snapshot.captured_by_white.len(), 1);
        assert!(snapshot.captured_by_black.is_empty());
        assert_eq!(snapshot.fen, game.to_fen());
        assert_eq!(snapshot.board[3][3].map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(snapshot.board[3][3].map(|p| p.color), Some(Color::White));
    }

    #[test]
    fn snapshot_json_round_trip() {
        let mut game = Match::new();
        game.play_notation("g1", "f3").unwrap();
        let snapshot = game.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"history\":[\"Nf3\"]"));
        assert!(json.contains("\"InProgress\":\"Black\""));

        let back: super::MatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
