//! A chess match: the board plus turn, check, en passant and history state.

use crate::error::{MatchError, SourceProblem};
use crate::movegen::{self, pseudo_legal_moves, try_move};
use crate::san::{self, SanFacts};
use crate::snapshot::MatchSnapshot;
use crate::{Bitboard, Board};
use chess_core::{
    CastlingAvailability, Color, Coordinate, FenParser, Move, MoveKind, Piece, PieceKind,
    Promotion,
};
use serde::{Deserialize, Serialize};

/// Grid column the king starts on.
const KING_COLUMN: u8 = 4;

/// Whether the match is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// The match continues with the given side to move.
    InProgress(Color),
    /// The match ended in checkmate.
    Checkmate { winner: Color },
}

/// A match between two players.
///
/// Every move goes through [`Match::play_move`], which either commits the
/// whole move or returns an error and leaves the match exactly as it was.
/// There is no stalemate or draw detection; a match only ends by checkmate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    board: Board,
    /// Ply counter starting at 1. It does not advance on the mating move.
    turn: u32,
    side_to_move: Color,
    check: bool,
    winner: Option<Color>,
    /// The pawn that advanced two ranks on the previous ply.
    en_passant: Option<Coordinate>,
    /// Square of a freshly promoted piece whose final kind may still change.
    pending_promotion: Option<Coordinate>,
    history: Vec<String>,
    captured: Vec<Piece>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Creates a match from the standard initial position with White to move.
    pub fn new() -> Self {
        Self::from_position(Board::standard(), 1, Color::White, None)
    }

    fn from_position(
        board: Board,
        turn: u32,
        side_to_move: Color,
        en_passant: Option<Coordinate>,
    ) -> Self {
        let check = movegen::is_king_attacked(&board, side_to_move);
        let mated = check && !movegen::has_legal_move(&board, side_to_move, en_passant);
        Match {
            board,
            turn,
            side_to_move,
            check,
            winner: mated.then(|| side_to_move.opposite()),
            en_passant,
            pending_promotion: None,
            history: Vec::new(),
            captured: Vec::new(),
        }
    }

    /// Creates a match from a FEN string.
    ///
    /// Castling rights decide whether kings and rooks count as unmoved, and
    /// pawns off their starting row count as moved. The en passant square
    /// marks the pawn standing in front of it as capturable. The fullmove
    /// number sets the ply counter. The halfmove clock is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, MatchError> {
        let parsed = FenParser::parse(fen)?;

        let mut board = Board::empty();
        for &(square, kind, color) in &parsed.placement {
            let mut piece = Piece::new(kind, color);
            if !starts_unmoved(square, kind, color, parsed.castling) {
                piece.move_count = 1;
            }
            board.place(piece, square);
        }

        let pawn_color = parsed.active_color.opposite();
        let en_passant = parsed
            .en_passant
            .and_then(|target| target.offset(pawn_color.forward(), 0))
            .filter(|sq| {
                board
                    .piece_at(*sq)
                    .is_some_and(|p| p.is(PieceKind::Pawn, pawn_color))
            });

        let turn = parsed
            .fullmove_number
            .saturating_sub(1)
            .saturating_mul(2)
            .saturating_add(match parsed.active_color {
                Color::White => 1,
                Color::Black => 2,
            });

        tracing::debug!("Match loaded from FEN {}", fen);
        Ok(Self::from_position(board, turn, parsed.active_color, en_passant))
    }

    /// Writes the position as FEN. The halfmove clock is always 0.
    pub fn to_fen(&self) -> String {
        let castling = CastlingAvailability {
            white_short: self.castling_right(Color::White, 7),
            white_long: self.castling_right(Color::White, 0),
            black_short: self.castling_right(Color::Black, 7),
            black_long: self.castling_right(Color::Black, 0),
        };
        let en_passant = self.en_passant.and_then(|pawn| {
            let color = self.board.occupant_color(pawn)?;
            pawn.offset(-color.forward(), 0)
        });
        FenParser {
            placement: self
                .board
                .pieces()
                .map(|(sq, p)| (sq, p.kind, p.color))
                .collect(),
            active_color: self.side_to_move,
            castling,
            en_passant,
            halfmove_clock: 0,
            fullmove_number: self.turn / 2 + self.turn % 2,
        }
        .to_fen()
    }

    fn castling_right(&self, color: Color, rook_column: u8) -> bool {
        let row = color.back_row();
        let unmoved = |column: u8, kind: PieceKind| {
            Coordinate::from_grid(row, column)
                .ok()
                .and_then(|sq| self.board.piece_at(sq))
                .is_some_and(|p| p.is(kind, color) && p.is_unmoved())
        };
        unmoved(KING_COLUMN, PieceKind::King) && unmoved(rook_column, PieceKind::Rook)
    }

    /// Returns the squares the piece on `source` can move to by its movement
    /// pattern.
    ///
    /// Meant for highlighting. Moves that would leave the king in check are
    /// still listed, and the piece does not have to belong to the side to
    /// move; [`Match::play_move`] rejects both.
    pub fn legal_destinations(&self, source: Coordinate) -> Result<Bitboard, MatchError> {
        if !self.board.is_occupied(source) {
            return Err(MatchError::NoPieceAtSource(source));
        }
        Ok(pseudo_legal_moves(&self.board, source, self.en_passant))
    }

    /// Plays a move for the side to move and returns the captured piece.
    ///
    /// A pawn reaching the last rank becomes a queen; call
    /// [`Match::resolve_promotion`] to pick another piece.
    pub fn play_move(
        &mut self,
        source: Coordinate,
        target: Coordinate,
    ) -> Result<Option<Piece>, MatchError> {
        self.commit(Move::new(source, target)).map_err(|err| {
            tracing::trace!("Rejected {}{}: {}", source, target, err);
            err
        })
    }

    /// Parses two coordinates like `"e2"` and `"e4"` and plays the move.
    pub fn play_notation(&mut self, source: &str, target: &str) -> Result<Option<Piece>, MatchError> {
        let source = Coordinate::from_notation(source)?;
        let target = Coordinate::from_notation(target)?;
        self.play_move(source, target)
    }

    /// Plays the one legal move a SAN string names.
    ///
    /// A promotion suffix other than `=Q` is resolved right after the move.
    pub fn play_san(&mut self, text: &str) -> Result<Option<Piece>, MatchError> {
        self.ensure_in_progress()?;
        let (m, promotion) = san::resolve(&self.board, self.side_to_move, self.en_passant, text)?;
        let captured = self.play_move(m.from, m.to)?;
        if let Some(choice) = promotion.filter(|&p| p != Promotion::Queen) {
            self.resolve_promotion(choice)?;
        }
        Ok(captured)
    }

    fn ensure_in_progress(&self) -> Result<(), MatchError> {
        match self.winner {
            Some(winner) => Err(MatchError::MatchOver { winner }),
            None => Ok(()),
        }
    }

    fn validate_source(&self, source: Coordinate) -> Result<Piece, MatchError> {
        let invalid = |problem| MatchError::InvalidSource {
            square: source,
            problem,
        };
        let piece = self
            .board
            .piece_at(source)
            .ok_or(invalid(SourceProblem::Empty))?;
        if piece.color != self.side_to_move {
            return Err(invalid(SourceProblem::NotYourPiece));
        }
        if pseudo_legal_moves(&self.board, source, self.en_passant).is_empty() {
            return Err(invalid(SourceProblem::NoMoves));
        }
        Ok(piece)
    }

    fn commit(&mut self, m: Move) -> Result<Option<Piece>, MatchError> {
        self.ensure_in_progress()?;
        let mover = self.validate_source(m.from)?;
        if !pseudo_legal_moves(&self.board, m.from, self.en_passant).contains(m.to) {
            return Err(MatchError::IllegalDestination {
                from: m.from,
                to: m.to,
            });
        }

        let facts = SanFacts::capture(&self.board, m, self.en_passant)
            .ok_or(MatchError::NoPieceAtSource(m.from))?;
        let applied = try_move(&self.board, m)?;

        // Nothing below can fail.
        self.board = applied.board;
        let captured = applied.captured.map(|(_, piece)| piece);
        self.captured.extend(captured);
        self.pending_promotion = applied.kind.is_promotion().then_some(m.to);
        self.en_passant = (applied.kind == MoveKind::DoubleStep).then_some(m.to);

        let opponent = mover.color.opposite();
        self.check = movegen::is_king_attacked(&self.board, opponent);
        let checkmate =
            self.check && !movegen::has_legal_move(&self.board, opponent, self.en_passant);

        let record = facts.render(self.check, checkmate);
        tracing::debug!("Turn {}: {} played {}", self.turn, mover.color, record);
        self.history.push(record);

        if checkmate {
            self.winner = Some(mover.color);
            tracing::debug!("Checkmate, {} wins on turn {}", mover.color, self.turn);
        } else {
            self.turn = self.turn.saturating_add(1);
            self.side_to_move = opponent;
        }
        Ok(captured)
    }

    /// Replaces the piece that just promoted with the chosen kind.
    ///
    /// Check and checkmate flags and the recorded SAN keep describing the
    /// queen the pawn first became.
    pub fn resolve_promotion(&mut self, choice: Promotion) -> Result<Piece, MatchError> {
        let square = self
            .pending_promotion
            .ok_or(MatchError::NoPromotionPending)?;
        let piece = self
            .board
            .piece_at_mut(square)
            .ok_or(MatchError::NoPromotionPending)?;
        piece.kind = choice.kind();
        let promoted = *piece;
        self.pending_promotion = None;
        tracing::debug!("Promotion on {} resolved to {}", square, promoted.kind);
        Ok(promoted)
    }

    /// Every move of the side to move that [`Match::play_move`] accepts.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        movegen::legal_moves(&self.board, self.side_to_move, self.en_passant)
    }

    /// The ply counter, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The side to move. After checkmate this is the winner, since the turn
    /// does not advance on the mating move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns true if the last move gave check.
    pub fn is_check(&self) -> bool {
        self.check
    }

    pub fn is_checkmate(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn state(&self) -> MatchState {
        match self.winner {
            Some(winner) => MatchState::Checkmate { winner },
            None => MatchState::InProgress(self.side_to_move),
        }
    }

    /// SAN of every committed move, in order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Every captured piece, in the order they were taken.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// The pieces `color` has captured.
    pub fn captured_by(&self, color: Color) -> Vec<Piece> {
        self.captured
            .iter()
            .copied()
            .filter(|p| p.color != color)
            .collect()
    }

    /// Every piece still on the board with its square.
    pub fn pieces_on_board(&self) -> Vec<(Coordinate, Piece)> {
        self.board.pieces().collect()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The pawn that may be captured en passant on this ply.
    pub fn en_passant_vulnerable(&self) -> Option<Coordinate> {
        self.en_passant
    }

    /// The square of a promoted piece whose kind can still be chosen.
    pub fn pending_promotion(&self) -> Option<Coordinate> {
        self.pending_promotion
    }

    /// A serialisable copy of the visible match state.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.to_matrix(),
            fen: self.to_fen(),
            turn: self.turn,
            state: self.state(),
            check: self.check,
            history: self.history.clone(),
            captured_by_white: self.captured_by(Color::White),
            captured_by_black: self.captured_by(Color::Black),
            en_passant_vulnerable: self.en_passant,
            pending_promotion: self.pending_promotion,
        }
    }
}

/// Whether a piece loaded from FEN counts as never having moved.
fn starts_unmoved(
    square: Coordinate,
    kind: PieceKind,
    color: Color,
    castling: CastlingAvailability,
) -> bool {
    let home = square.row() == color.back_row();
    match kind {
        PieceKind::Pawn => square.row() == color.pawn_row(),
        PieceKind::King => {
            home && square.column() == KING_COLUMN && (castling.short(color) || castling.long(color))
        }
        PieceKind::Rook => {
            home && ((square.column() == 7 && castling.short(color))
                || (square.column() == 0 && castling.long(color)))
        }
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
    }
}
