//! Property-based tests over random legal walks from the initial position.

use crate::board::{Color, Position};
use proptest::prelude::*;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Positions visited by a seeded random walk, the initial position first.
fn random_walk(seed: u64, plies: usize) -> Vec<Position> {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut walk = vec![Position::initial()];
    for _ in 0..plies {
        let current = &walk[walk.len() - 1];
        let moves = current.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        let next = current.apply(mv).expect("generated moves apply");
        walk.push(next);
    }
    walk
}

proptest! {
    /// Property: the incrementally updated hash equals a from-scratch recomputation
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), plies in move_count_strategy()) {
        for position in random_walk(seed, plies) {
            prop_assert_eq!(position.zobrist(), position.compute_hash());
        }
    }

    /// Property: FEN round-trip yields an equal position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), plies in move_count_strategy()) {
        for position in random_walk(seed, plies) {
            let restored = Position::from_fen(&position.to_fen());
            prop_assert_eq!(&restored, &position);
            prop_assert_eq!(restored.zobrist(), position.zobrist());
        }
    }

    /// Property: no generated move leaves the mover in check
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), plies in move_count_strategy()) {
        for position in random_walk(seed, plies) {
            let mover = position.side_to_move();
            for &mv in position.legal_moves().iter() {
                let next = position.apply(mv).unwrap();
                prop_assert!(!next.is_in_check(mover), "{} leaves {} in check", mv, mover);
            }
        }
    }

    /// Property: piece counts never increase and the side to move alternates
    #[test]
    fn prop_material_never_increases(seed in seed_strategy(), plies in move_count_strategy()) {
        let walk = random_walk(seed, plies);
        for pair in walk.windows(2) {
            for color in Color::BOTH {
                prop_assert!(pair[1].count(color) <= pair[0].count(color));
            }
            prop_assert_eq!(pair[1].side_to_move(), pair[0].side_to_move().opponent());
            prop_assert!(pair[0].castling_rights().contains(pair[1].castling_rights()));
        }
    }

    /// Property: move generation is a pure function of the position
    #[test]
    fn prop_generation_is_deterministic(seed in seed_strategy(), plies in move_count_strategy()) {
        for position in random_walk(seed, plies) {
            let copy = Position::from_fen(&position.to_fen());
            prop_assert_eq!(position.legal_moves(), copy.legal_moves());
        }
    }

    /// Property: a recorded en passant target always has a capturing pawn
    #[test]
    fn prop_en_passant_is_usable(seed in seed_strategy(), plies in move_count_strategy()) {
        for position in random_walk(seed, plies) {
            if position.en_passant_target().is_some() {
                prop_assert!(position.legal_moves().iter().any(|m| m.is_en_passant())
                    || position.en_passant_capturable(position.en_passant_target().unwrap()));
            }
        }
    }
}
