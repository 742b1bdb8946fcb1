//! Successor construction and rejection of moves that do not fit the position.

use crate::board::{IllegalMoveReason, Move, Piece, Position, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn reason(position: &Position, mv: Move) -> IllegalMoveReason {
    position.apply(mv).expect_err("move should be rejected").reason
}

#[test]
fn test_apply_leaves_source_untouched() {
    let position = Position::initial();
    let before = position.to_fen();
    let next = position.apply(Move::double_pawn_push(sq("e2"), sq("e4"))).unwrap();
    assert_eq!(position.to_fen(), before);
    assert_eq!(
        next.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_double_push_records_usable_en_passant_only() {
    let position = Position::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1");
    let next = position.apply(Move::double_pawn_push(sq("e2"), sq("e4"))).unwrap();
    assert_eq!(next.en_passant_target(), Some(sq("e3")));

    let lonely = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let next = lonely.apply(Move::double_pawn_push(sq("e2"), sq("e4"))).unwrap();
    assert_eq!(next.en_passant_target(), None);
}

#[test]
fn test_transpositions_are_equal() {
    let a = ["g1f3", "g8f6", "b1c3"]
        .iter()
        .try_fold(Position::initial(), |p, m| p.apply_uci(m))
        .unwrap();
    let b = ["b1c3", "g8f6", "g1f3"]
        .iter()
        .try_fold(Position::initial(), |p, m| p.apply_uci(m))
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.zobrist(), b.zobrist());
}

#[test]
fn test_knight_tour_returns_to_initial() {
    let back = ["g1f3", "g8f6", "f3g1", "f6g8"]
        .iter()
        .try_fold(Position::initial(), |p, m| p.apply_uci(m))
        .unwrap();
    assert_eq!(back, Position::initial());
}

#[test]
fn test_rejects_empty_and_enemy_source() {
    let position = Position::initial();
    assert_eq!(
        reason(&position, Move::new(sq("e4"), sq("e5"))),
        IllegalMoveReason::NoPieceToMove
    );
    assert_eq!(
        reason(&position, Move::new(sq("e7"), sq("e6"))),
        IllegalMoveReason::NoPieceToMove
    );
}

#[test]
fn test_rejects_own_capture_and_unreachable() {
    let position = Position::initial();
    assert_eq!(
        reason(&position, Move::new(sq("d1"), sq("d2"))),
        IllegalMoveReason::OwnPieceOnTarget
    );
    assert_eq!(
        reason(&position, Move::new(sq("d1"), sq("d5"))),
        IllegalMoveReason::UnreachableTarget
    );
    assert_eq!(
        reason(&position, Move::new(sq("e2"), sq("e5"))),
        IllegalMoveReason::UnreachableTarget
    );
}

#[test]
fn test_rejects_king_capture() {
    // black king left en prise on e8
    let position = Position::from_fen("4k2R/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(
        reason(&position, Move::new(sq("h8"), sq("e8"))),
        IllegalMoveReason::KingCapture
    );
    assert!(!position
        .legal_moves()
        .iter()
        .any(|m| m.to() == sq("e8")));
}

#[test]
fn test_rejects_promotion_mismatch() {
    let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    assert_eq!(
        reason(&position, Move::new(sq("a7"), sq("a8"))),
        IllegalMoveReason::PromotionMismatch
    );
    let knight = Move::promotion_to(sq("e2"), sq("e3"), Piece::Knight).unwrap();
    assert_eq!(
        reason(&Position::initial(), knight),
        IllegalMoveReason::PromotionMismatch
    );
}

#[test]
fn test_rejects_mismatched_tags() {
    let position = Position::initial();
    assert_eq!(
        reason(&position, Move::new(sq("e2"), sq("e4"))),
        IllegalMoveReason::SpecialTagMismatch
    );
    assert_eq!(
        reason(&position, Move::castle_kingside(sq("e1"), sq("g1"))),
        IllegalMoveReason::CastlingNotAllowed
    );
    assert_eq!(
        reason(&position, Move::en_passant(sq("e2"), sq("d3"))),
        IllegalMoveReason::EnPassantNotAllowed
    );
    assert_eq!(
        reason(&position, Move::castle_kingside(sq("g1"), sq("h3"))),
        IllegalMoveReason::SpecialTagMismatch
    );
}

#[test]
fn test_castling_without_right_rejected() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
    assert_eq!(
        reason(&position, Move::castle_kingside(sq("e1"), sq("g1"))),
        IllegalMoveReason::CastlingNotAllowed
    );
    assert!(position
        .apply(Move::castle_queenside(sq("e1"), sq("c1")))
        .is_ok());
}
