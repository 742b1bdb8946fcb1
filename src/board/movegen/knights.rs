use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Move, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, emit: &mut impl FnMut(Move, Piece)) {
        let targets = Bitboard(KNIGHT_ATTACKS[from.index()] & !self.capture_blockers());
        for to in targets.iter() {
            emit(Move::new(from, to), Piece::Knight);
        }
    }

    /// Squares a piece of the side to move can never land on: its own pieces and the enemy king.
    pub(crate) fn capture_blockers(&self) -> u64 {
        self.occupied_by(self.side_to_move).0
            | self.pieces_of(self.side_to_move.opponent(), Piece::King).0
    }
}
