//! Precomputed attack tables for leaper pieces (knights, kings, pawns) and slider rays.

use once_cell::sync::Lazy;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Ray directions as (rank delta, file delta).
/// The first four increase the square index, the last four decrease it.
pub(crate) const RAY_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),   // north
    (0, 1),   // east
    (1, 1),   // north-east
    (1, -1),  // north-west
    (-1, 0),  // south
    (0, -1),  // west
    (-1, -1), // south-west
    (-1, 1),  // south-east
];

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        *slot = mask;
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` standing on `sq` attacks.
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

/// `RAYS[direction][sq]`: every square from `sq` to the board edge, `sq` excluded.
pub(crate) static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for (dir, &(dr, df)) in RAY_DIRECTIONS.iter().enumerate() {
        for sq in 0..64 {
            let mut r = (sq / 8) as isize + dr;
            let mut f = (sq % 8) as isize + df;
            let mut mask = 0u64;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                mask |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            rays[dir][sq] = mask;
        }
    }
    rays
});
