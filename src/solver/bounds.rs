//! Admissible lower bounds on the plies separating a position from the target.
//!
//! Every rule here only ever underestimates, so discarding a position whose
//! bound exceeds the remaining budget never loses a solution that fits in it.

use crate::board::{CastlingRights, Color, Piece, Position};

/// Target facts the bound needs, computed once per solve.
#[derive(Clone, Debug)]
pub(crate) struct TargetProfile {
    placement: [[u64; 6]; 2],
    counts: [u32; 2],
    pawns: [u32; 2],
    castling: CastlingRights,
    side_to_move: Color,
}

impl TargetProfile {
    pub(crate) fn new(target: &Position) -> Self {
        let mut placement = [[0u64; 6]; 2];
        let mut counts = [0u32; 2];
        let mut pawns = [0u32; 2];
        for (c, color) in Color::BOTH.into_iter().enumerate() {
            for (p, piece) in Piece::ALL.into_iter().enumerate() {
                placement[c][p] = target.pieces_of(color, piece).0;
            }
            counts[c] = target.count(color);
            pawns[c] = target.pieces_of(color, Piece::Pawn).popcount();
        }
        TargetProfile {
            placement,
            counts,
            pawns,
            castling: target.castling_rights(),
            side_to_move: target.side_to_move(),
        }
    }

    /// Fewest plies that could turn `position` into the target, or `None`
    /// when no continuation can reach it.
    pub(crate) fn lower_bound(&self, position: &Position) -> Option<u16> {
        // Castling rights are never regained.
        if !position.castling_rights().contains(self.castling) {
            return None;
        }

        let mut need = [0u32; 2];
        for (c, color) in Color::BOTH.into_iter().enumerate() {
            let count = position.count(color);
            let pawns = position.pieces_of(color, Piece::Pawn).popcount();
            // Material never grows back.
            if count < self.counts[c] || pawns < self.pawns[c] {
                return None;
            }

            let opp = 1 - c;
            let captures = position.count(color.opponent()).saturating_sub(self.counts[opp]);

            let mut misplaced = 0;
            for (p, piece) in Piece::ALL.into_iter().enumerate() {
                let have = position.pieces_of(color, piece).0;
                misplaced += (self.placement[c][p] & !have).count_ones();
            }
            // A castling move fills two target squares at once, but only
            // gains anything while the king is off its target square.
            let king = position.pieces_of(color, Piece::King).0;
            let king_home = self.placement[c][Piece::King.index()] & king != 0;
            let castle_bonus =
                u32::from(position.castling_rights().any_for(color) && !king_home);
            let fills = misplaced.saturating_sub(castle_bonus);

            need[c] = captures.max(fills);
        }

        let mover = position.side_to_move().index();
        let (need_mover, need_other) = (need[mover], need[1 - mover]);
        // The mover makes the odd plies; the target's side to move fixes parity.
        let plies = if position.side_to_move() == self.side_to_move {
            2 * need_mover.max(need_other)
        } else {
            2 * need_mover.saturating_sub(1).max(need_other) + 1
        };
        Some(u16::try_from(plies).unwrap_or(u16::MAX))
    }

    /// Whether a position first seen at `depth` may still lead to the target
    /// within `max_plies`.
    pub(crate) fn admits(&self, position: &Position, depth: u16, max_plies: u16) -> bool {
        self.lower_bound(position)
            .is_some_and(|bound| u32::from(depth) + u32::from(bound) <= u32::from(max_plies))
    }
}
