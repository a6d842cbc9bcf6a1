//! Full-game scenarios played through the public `Match` API.

use chess_core::{Color, Coordinate, PieceKind, Promotion};
use chess_rules::movegen::perft::perft;
use chess_rules::{Match, MatchError, MatchState, SourceProblem};

fn sq(s: &str) -> Coordinate {
    Coordinate::from_notation(s).unwrap()
}

/// Plays moves written as "e2e4".
fn play(game: &mut Match, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        if let Err(e) = game.play_notation(from, to) {
            panic!("{} failed after {:?}: {}", m, game.history(), e);
        }
    }
}

#[test]
fn test_scholars_mate() {
    let mut game = Match::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );

    assert_eq!(
        game.history(),
        ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]
    );
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(game.state(), MatchState::Checkmate { winner: Color::White });
    assert_eq!(game.turn(), 7, "the mating move does not advance the turn");
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.captured_by(Color::White).len(), 1);
    assert_eq!(game.pieces_on_board().len(), 31);
}

#[test]
fn test_check_is_reported_without_mate() {
    let mut game = Match::new();
    play(&mut game, &["e2e4", "f7f6", "d1h5"]);
    assert_eq!(game.history().last().map(String::as_str), Some("Qh5+"));
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.side_to_move(), Color::Black);

    play(&mut game, &["g7g6"]);
    assert!(!game.is_check());
}

#[test]
fn test_pinned_pawn_rolls_back() {
    let mut game = Match::new();
    play(&mut game, &["e2e4", "e7e5", "d1h5"]);
    let before = game.clone();

    let err = game.play_notation("f7", "f6").unwrap_err();
    assert_eq!(
        err,
        MatchError::SelfCheck {
            from: sq("f7"),
            to: sq("f6")
        }
    );
    assert_eq!(game, before, "a rejected move must leave the match untouched");
    assert_eq!(game.turn(), 4);
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn test_en_passant_by_black() {
    let mut game = Match::new();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    assert_eq!(game.en_passant_vulnerable(), Some(sq("e4")));

    let captured = game.play_notation("d4", "e3").unwrap();
    assert!(captured.is_some_and(|p| p.is(PieceKind::Pawn, Color::White)));
    assert!(!game.board().is_occupied(sq("e4")));
    assert_eq!(game.history().last().map(String::as_str), Some("dxe3"));
    assert_eq!(game.en_passant_vulnerable(), None);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut game = Match::new();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4", "h7h6", "h2h3"]);
    assert_eq!(game.en_passant_vulnerable(), None);
    assert!(matches!(
        game.play_notation("d4", "e3"),
        Err(MatchError::IllegalDestination { .. })
    ));
}

#[test]
fn test_en_passant_is_the_only_escape() {
    let mut game = Match::from_fen("8/8/3ppp2/3pkp2/4pp2/1N6/3P4/7K w - - 0 1").unwrap();
    play(&mut game, &["d2d4"]);
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.history(), ["d4+"]);

    let escapes: Vec<String> = game.legal_moves().iter().map(|m| m.to_uci()).collect();
    assert_eq!(escapes, ["e4d3"]);

    assert!(game.play_notation("e4", "d3").unwrap().is_some());
    assert_eq!(game.history(), ["d4+", "exd3"]);
    assert!(!game.board().is_occupied(sq("d4")));
}

#[test]
fn test_castling_rejections() {
    // Bishop still on f1.
    let mut game = Match::new();
    play(&mut game, &["e2e4", "e7e5"]);
    assert!(matches!(
        game.play_notation("e1", "g1"),
        Err(MatchError::IllegalDestination { .. })
    ));

    // Rook left h1 and came back.
    let mut game = Match::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert!(matches!(
        game.play_notation("e1", "g1"),
        Err(MatchError::IllegalDestination { .. })
    ));
    play(&mut game, &["e1c1"]);
    assert_eq!(game.history().last().map(String::as_str), Some("O-O-O"));
    assert!(game
        .board()
        .piece_at(sq("d1"))
        .is_some_and(|p| p.is(PieceKind::Rook, Color::White)));

    // Black may still castle short but not long.
    assert!(game.legal_destinations(sq("e8")).unwrap().contains(sq("g8")));
    assert!(!game.legal_destinations(sq("e8")).unwrap().contains(sq("c8")));
}

#[test]
fn test_castling_escapes_mate() {
    let mut game = Match::from_fen("1k5r/8/b7/8/8/8/3P1P2/3RK2R b K - 0 1").unwrap();
    play(&mut game, &["h8e8"]);
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.history(), ["Re8+"]);
    assert_eq!(game.legal_moves().len(), 1);

    play(&mut game, &["e1g1"]);
    assert_eq!(game.history(), ["Re8+", "O-O"]);
    assert!(!game.is_check());
    assert!(game
        .board()
        .piece_at(sq("f1"))
        .is_some_and(|p| p.is(PieceKind::Rook, Color::White)));
}

#[test]
fn test_promotion_and_resolution() {
    let mut game = Match::from_fen("8/1P6/8/8/8/8/5k2/K7 w - - 0 1").unwrap();
    assert_eq!(game.play_notation("b7", "b8"), Ok(None));
    assert_eq!(game.pending_promotion(), Some(sq("b8")));
    assert_eq!(game.history(), ["b8=Q"]);

    let choice: Promotion = "N".parse().unwrap();
    let knight = game.resolve_promotion(choice).unwrap();
    assert!(knight.is(PieceKind::Knight, Color::White));
    assert!(game
        .board()
        .piece_at(sq("b8"))
        .is_some_and(|p| p.is(PieceKind::Knight, Color::White)));
    assert_eq!(game.history(), ["b8=Q"], "the record keeps the queen");
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn test_resolve_promotion_without_pending() {
    let mut game = Match::new();
    assert_eq!(
        game.resolve_promotion(Promotion::Queen),
        Err(MatchError::NoPromotionPending)
    );
    assert_eq!(game, Match::new());
}

#[test]
fn test_disambiguation_by_file() {
    let mut game = Match::new();
    play(&mut game, &["g1f3", "g8f6", "d2d3", "d7d6", "b1d2"]);
    assert_eq!(game.history().last().map(String::as_str), Some("Nbd2"));
}

#[test]
fn test_disambiguation_by_rank() {
    let mut game = Match::from_fen("7k/8/8/R7/8/8/8/R3K3 w - - 0 1").unwrap();
    play(&mut game, &["a1a3"]);
    assert_eq!(game.history(), ["R1a3"]);
}

#[test]
fn test_disambiguation_by_file_and_rank() {
    let mut game = Match::from_fen("8/8/1k6/8/4Q2Q/8/8/K6Q w - - 0 1").unwrap();
    play(&mut game, &["h4e1"]);
    assert_eq!(game.history(), ["Qh4e1"]);
}

#[test]
fn test_disambiguation_same_rank_rooks() {
    let mut game = Match::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").unwrap();
    play(&mut game, &["a1d1"]);
    assert_eq!(game.history(), ["Rad1"]);
}

#[test]
fn test_disambiguation_rooks_without_shared_line() {
    let mut game = Match::from_fen("4k3/8/8/8/7R/4K3/8/R7 w - - 0 1").unwrap();
    play(&mut game, &["h4a4"]);
    assert_eq!(game.history(), ["Rha4"]);

    let mut game = Match::from_fen("4k3/8/8/8/7R/4K3/8/R7 w - - 0 1").unwrap();
    play(&mut game, &["a1h1"]);
    assert_eq!(game.history(), ["Rah1"]);
}

#[test]
fn test_king_moves_are_never_disambiguated() {
    let mut game = Match::new();
    play(&mut game, &["e2e4", "e7e5", "e1e2"]);
    assert_eq!(game.history().last().map(String::as_str), Some("Ke2"));
}

#[test]
fn test_source_errors() {
    let mut game = Match::new();
    assert!(matches!(
        game.play_notation("d4", "d5"),
        Err(MatchError::InvalidSource {
            problem: SourceProblem::Empty,
            ..
        })
    ));
    assert!(matches!(
        game.play_notation("z9", "d5"),
        Err(MatchError::InvalidNotation(_))
    ));
    assert_eq!(
        game.legal_destinations(sq("d4")),
        Err(MatchError::NoPieceAtSource(sq("d4")))
    );
}

#[test]
fn test_san_replay_matches_history() {
    let mut played = Match::new();
    play(
        &mut played,
        &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6"],
    );

    let mut replayed = Match::new();
    for san in played.history() {
        replayed.play_san(san).unwrap();
    }
    assert_eq!(replayed.history(), played.history());
    assert_eq!(replayed.to_fen(), played.to_fen());
}

#[test]
fn test_perft_from_initial_position() {
    let game = Match::new();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8902);
}
