//! Attack tables for move generation.
//!
//! Leaper attacks come straight from lookup tables. Sliding attacks walk the
//! precomputed rays and cut each one at its first blocker: for rays that grow
//! the square index the blocker is the lowest set bit, otherwise the highest.

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use tables::RAYS;

use super::{Piece, Square};

#[inline]
fn ray_attacks(dir: usize, sq: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][sq];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let first = if dir < 4 {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][first]
}

/// Sliding attacks from `from_idx`: diagonal when `bishop` is set, orthogonal otherwise.
pub(crate) fn slider_attacks(from_idx: usize, occupancy: u64, bishop: bool) -> u64 {
    let dirs: [usize; 4] = if bishop { [2, 3, 6, 7] } else { [0, 1, 4, 5] };
    dirs.iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, from_idx, occupancy))
}

/// Squares attacked by a non-pawn piece standing on `sq`.
pub(crate) fn piece_attacks(piece: Piece, sq: Square, occupancy: u64) -> u64 {
    let idx = sq.index();
    match piece {
        Piece::Knight => KNIGHT_ATTACKS[idx],
        Piece::King => KING_ATTACKS[idx],
        Piece::Bishop => slider_attacks(idx, occupancy, true),
        Piece::Rook => slider_attacks(idx, occupancy, false),
        Piece::Queen => slider_attacks(idx, occupancy, true) | slider_attacks(idx, occupancy, false),
        Piece::Pawn => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_blocked() {
        // rook on a1, blocker on a3: attacks a2, a3 and the whole first rank
        let occ = 1u64 << 16;
        let attacks = slider_attacks(0, occ, false);
        assert_eq!(attacks, (1u64 << 8) | (1u64 << 16) | 0xFE);
    }

    #[test]
    fn test_bishop_blocked_both_ways() {
        // bishop on d4 (27), blockers on f6 (45) and b2 (9)
        let occ = (1u64 << 45) | (1u64 << 9);
        let attacks = slider_attacks(27, occ, true);
        assert!(attacks & (1u64 << 45) != 0);
        assert!(attacks & (1u64 << 54) == 0);
        assert!(attacks & (1u64 << 9) != 0);
        assert!(attacks & 1 == 0);
    }

    #[test]
    fn test_queen_open_board() {
        let d4 = Square::from_index(27);
        assert_eq!(piece_attacks(Piece::Queen, d4, 0).count_ones(), 27);
    }
}
