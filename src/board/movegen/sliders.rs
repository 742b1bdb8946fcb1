use super::super::attack_tables::piece_attacks;
use super::super::{Bitboard, Move, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: Piece,
        emit: &mut impl FnMut(Move, Piece),
    ) {
        debug_assert!(slider.is_slider());
        let targets = piece_attacks(slider, from, self.all_occupied().0) & !self.capture_blockers();
        for to in Bitboard(targets).iter() {
            emit(Move::new(from, to), slider);
        }
    }
}
