use super::super::{Move, Piece, Position, Square, PROMOTION_PIECES};

#[derive(Clone, Copy)]
enum PawnStep {
    Push,
    DoublePush,
    Capture,
    EnPassant,
}

impl Position {
    pub(crate) fn generate_pawn_moves(&self, from: Square, emit: &mut impl FnMut(Move, Piece)) {
        let color = self.side_to_move;
        let opponent = color.opponent();
        let dir = color.pawn_direction();

        let mut steps = [(from, PawnStep::Push); 4];
        let mut len = 0;
        let mut push = |to: Square, step: PawnStep| {
            steps[len] = (to, step);
            len += 1;
        };

        if let Some(forward) = from.offset(dir, 0) {
            if self.is_empty(forward) {
                push(forward, PawnStep::Push);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double) = forward.offset(dir, 0) {
                        if self.is_empty(double) {
                            push(double, PawnStep::DoublePush);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(dir, df) else {
                continue;
            };
            match self.piece_at(target) {
                Some((c, piece)) if c == opponent && piece != Piece::King => {
                    push(target, PawnStep::Capture);
                }
                None if self.en_passant == Some(target) => {
                    push(target, PawnStep::EnPassant);
                }
                _ => {}
            }
        }

        let steps = &mut steps[..len];
        steps.sort_unstable_by_key(|(sq, _)| sq.index());

        for &(to, step) in steps.iter() {
            match step {
                PawnStep::Push | PawnStep::Capture if to.rank() == color.pawn_promotion_rank() => {
                    for promo in PROMOTION_PIECES {
                        if let Some(mv) = Move::promotion_to(from, to, promo) {
                            emit(mv, Piece::Pawn);
                        }
                    }
                }
                PawnStep::Push | PawnStep::Capture => emit(Move::new(from, to), Piece::Pawn),
                PawnStep::DoublePush => emit(Move::double_pawn_push(from, to), Piece::Pawn),
                PawnStep::EnPassant => emit(Move::en_passant(from, to), Piece::Pawn),
            }
        }
    }
}
