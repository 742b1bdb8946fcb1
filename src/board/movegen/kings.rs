use super::super::apply::rook_castle_squares;
use super::super::attack_tables::{piece_attacks, KING_ATTACKS, PAWN_ATTACKS};
use super::super::{Bitboard, Color, Move, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, from: Square, emit: &mut impl FnMut(Move, Piece)) {
        let targets = Bitboard(KING_ATTACKS[from.index()] & !self.capture_blockers());
        for to in targets.iter() {
            emit(Move::new(from, to), Piece::King);
        }

        let side = self.side_to_move;
        let rank = side.back_rank();
        if from != Square::at(rank, 4) {
            return;
        }
        if self.castle_path_clear(side, true) {
            emit(Move::castle_kingside(from, Square::at(rank, 6)), Piece::King);
        }
        if self.castle_path_clear(side, false) {
            emit(Move::castle_queenside(from, Square::at(rank, 2)), Piece::King);
        }
    }

    /// Right still held, rook at home and nothing between king and rook.
    fn castle_path_clear(&self, side: Color, kingside: bool) -> bool {
        if !self.castling.has(side, kingside) {
            return false;
        }
        let (rook_from, _) = rook_castle_squares(side, kingside);
        if !self.pieces_of(side, Piece::Rook).contains(rook_from) {
            return false;
        }
        let rank = side.back_rank();
        let between: &[usize] = if kingside { &[5, 6] } else { &[1, 2, 3] };
        between.iter().all(|&file| self.is_empty(Square::at(rank, file)))
    }

    /// The king may not castle out of, through, or into an attacked square.
    pub(crate) fn castling_path_attacked(&self, mv: Move, attacker: Color) -> bool {
        let rank = mv.from().rank();
        let files: [usize; 3] = if mv.is_castle_kingside() {
            [4, 5, 6]
        } else {
            [4, 3, 2]
        };
        files
            .iter()
            .any(|&file| self.is_square_attacked(Square::at(rank, file), attacker))
    }

    /// Whether any piece of `attacker` attacks `sq` on the current board.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, attacker: Color) -> bool {
        let idx = sq.index();
        let occupancy = self.all_occupied().0;

        if PAWN_ATTACKS[attacker.opponent().index()][idx]
            & self.pieces_of(attacker, Piece::Pawn).0
            != 0
        {
            return true;
        }
        if piece_attacks(Piece::Knight, sq, occupancy) & self.pieces_of(attacker, Piece::Knight).0
            != 0
        {
            return true;
        }
        if KING_ATTACKS[idx] & self.pieces_of(attacker, Piece::King).0 != 0 {
            return true;
        }

        let queens = self.pieces_of(attacker, Piece::Queen).0;
        let diagonal = self.pieces_of(attacker, Piece::Bishop).0 | queens;
        if piece_attacks(Piece::Bishop, sq, occupancy) & diagonal != 0 {
            return true;
        }
        let straight = self.pieces_of(attacker, Piece::Rook).0 | queens;
        piece_attacks(Piece::Rook, sq, occupancy) & straight != 0
    }

    /// Whether `color`'s king is attacked. A side without a king is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }
}
