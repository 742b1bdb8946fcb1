//! Successor construction: `Position::apply` and its unchecked core.
//!
//! `apply` first checks that the move fits the placement (right piece, reachable
//! destination, special tags that describe the move), then builds the successor
//! with an incrementally updated Zobrist key. It does not test whether the
//! mover's king is left in check; legality is the move generator's business.

use crate::zobrist::ZOBRIST;

use super::attack_tables::piece_attacks;
use super::error::{IllegalMoveError, IllegalMoveReason};
use super::{Color, Move, Piece, Position, SpecialMove, Square};

/// Home squares of the rook for each castling side.
#[inline]
pub(crate) fn rook_castle_squares(color: Color, kingside: bool) -> (Square, Square) {
    let rank = color.back_rank();
    if kingside {
        (Square::at(rank, 7), Square::at(rank, 5))
    } else {
        (Square::at(rank, 0), Square::at(rank, 3))
    }
}

impl Position {
    /// Apply a move and return the resulting position.
    ///
    /// Fails with [`IllegalMoveError`] when the move does not fit the piece
    /// placement: no piece of the side to move on the source square, a
    /// destination the piece cannot reach, a capture of a friendly piece or a
    /// king, a missing or misplaced promotion, or a special tag (castling, en
    /// passant, double push) that the position does not allow.
    pub fn apply(&self, mv: Move) -> Result<Position, IllegalMoveError> {
        let piece = self
            .check_move(mv)
            .map_err(|reason| IllegalMoveError { mv, reason })?;
        Ok(self.apply_unchecked(mv, piece))
    }

    fn check_move(&self, mv: Move) -> Result<Piece, IllegalMoveReason> {
        let side = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());

        let piece = match self.piece_at(from) {
            Some((color, piece)) if color == side => piece,
            _ => return Err(IllegalMoveReason::NoPieceToMove),
        };

        if mv.is_castling() {
            if piece != Piece::King {
                return Err(IllegalMoveReason::SpecialTagMismatch);
            }
            return self.check_castling(mv).map(|()| piece);
        }

        match self.piece_at(to) {
            Some((color, _)) if color == side => return Err(IllegalMoveReason::OwnPieceOnTarget),
            Some((_, Piece::King)) => return Err(IllegalMoveReason::KingCapture),
            _ => {}
        }

        if piece == Piece::Pawn {
            self.check_pawn_move(mv)?;
        } else {
            if mv.promotion().is_some() {
                return Err(IllegalMoveReason::PromotionMismatch);
            }
            if mv.special().is_some() {
                return Err(IllegalMoveReason::SpecialTagMismatch);
            }
            if piece_attacks(piece, from, self.all_occupied().0) & to.bit() == 0 {
                return Err(IllegalMoveReason::UnreachableTarget);
            }
        }

        Ok(piece)
    }

    fn check_castling(&self, mv: Move) -> Result<(), IllegalMoveReason> {
        let side = self.side_to_move;
        let kingside = mv.is_castle_kingside();
        let rank = side.back_rank();
        let king_from = Square::at(rank, 4);
        let king_to = Square::at(rank, if kingside { 6 } else { 2 });
        let (rook_from, _) = rook_castle_squares(side, kingside);

        if mv.from() != king_from || mv.to() != king_to {
            return Err(IllegalMoveReason::CastlingNotAllowed);
        }
        if !self.castling.has(side, kingside)
            || self.piece_at(rook_from) != Some((side, Piece::Rook))
        {
            return Err(IllegalMoveReason::CastlingNotAllowed);
        }
        let between: &[usize] = if kingside { &[5, 6] } else { &[1, 2, 3] };
        if between
            .iter()
            .any(|&file| !self.is_empty(Square::at(rank, file)))
        {
            return Err(IllegalMoveReason::CastlingNotAllowed);
        }
        Ok(())
    }

    fn check_pawn_move(&self, mv: Move) -> Result<(), IllegalMoveReason> {
        let side = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        let dir = side.pawn_direction();
        let dr = to.rank() as isize - from.rank() as isize;
        let df = (to.file() as isize - from.file() as isize).abs();
        let target_empty = self.is_empty(to);

        match mv.special() {
            Some(SpecialMove::EnPassant) => {
                let victim = Square::at(from.rank(), to.file());
                if dr != dir
                    || df != 1
                    || self.en_passant != Some(to)
                    || !target_empty
                    || self.piece_at(victim) != Some((side.opponent(), Piece::Pawn))
                {
                    return Err(IllegalMoveReason::EnPassantNotAllowed);
                }
                return Ok(());
            }
            Some(SpecialMove::DoublePawnPush) => {
                let reachable = from.rank() == side.pawn_start_rank()
                    && df == 0
                    && dr == 2 * dir
                    && target_empty
                    && from
                        .offset(dir, 0)
                        .is_some_and(|mid| self.is_empty(mid));
                return if reachable {
                    Ok(())
                } else {
                    Err(IllegalMoveReason::UnreachableTarget)
                };
            }
            Some(SpecialMove::CastleKingside | SpecialMove::CastleQueenside) => {
                return Err(IllegalMoveReason::SpecialTagMismatch);
            }
            None => {}
        }

        let is_push = df == 0 && dr == dir && target_empty;
        let is_capture = df == 1 && dr == dir && !target_empty;
        if !is_push && !is_capture {
            if df == 0 && dr == 2 * dir {
                return Err(IllegalMoveReason::SpecialTagMismatch);
            }
            return Err(IllegalMoveReason::UnreachableTarget);
        }

        let reaches_last_rank = to.rank() == side.pawn_promotion_rank();
        if reaches_last_rank != mv.promotion().is_some() {
            return Err(IllegalMoveReason::PromotionMismatch);
        }
        Ok(())
    }

    /// Build the successor of a move already known to fit the placement.
    pub(crate) fn apply_unchecked(&self, mv: Move, piece: Piece) -> Position {
        let side = self.side_to_move;
        let opp = side.opponent();
        let (from, to) = (mv.from(), mv.to());
        let mut next = self.clone();

        let mut hash = self.hash;
        hash ^= ZOBRIST.side(side);
        hash ^= ZOBRIST.castling(self.castling);
        hash ^= ZOBRIST.en_passant(self.en_passant);

        if mv.is_castling() {
            let (rook_from, rook_to) = rook_castle_squares(side, mv.is_castle_kingside());
            next.remove_piece(from, side, Piece::King);
            next.set_piece(to, side, Piece::King);
            next.remove_piece(rook_from, side, Piece::Rook);
            next.set_piece(rook_to, side, Piece::Rook);
            hash ^= ZOBRIST.piece(side, Piece::King, from) ^ ZOBRIST.piece(side, Piece::King, to);
            hash ^= ZOBRIST.piece(side, Piece::Rook, rook_from)
                ^ ZOBRIST.piece(side, Piece::Rook, rook_to);
        } else {
            if mv.is_en_passant() {
                let victim = Square::at(from.rank(), to.file());
                next.remove_piece(victim, opp, Piece::Pawn);
                hash ^= ZOBRIST.piece(opp, Piece::Pawn, victim);
            } else if let Some((_, captured)) = self.piece_at(to) {
                next.remove_piece(to, opp, captured);
                hash ^= ZOBRIST.piece(opp, captured, to);
                if captured == Piece::Rook {
                    clear_rook_right(&mut next, opp, to);
                }
            }

            let placed = mv.promotion().unwrap_or(piece);
            next.remove_piece(from, side, piece);
            next.set_piece(to, side, placed);
            hash ^= ZOBRIST.piece(side, piece, from) ^ ZOBRIST.piece(side, placed, to);
        }

        match piece {
            Piece::King => next.castling.remove_color(side),
            Piece::Rook => clear_rook_right(&mut next, side, from),
            _ => {}
        }

        next.side_to_move = opp;
        next.en_passant = None;
        if piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            next.en_passant = Some(Square::at((from.rank() + to.rank()) / 2, from.file()));
            next.normalize_en_passant();
        }

        hash ^= ZOBRIST.side(opp);
        hash ^= ZOBRIST.castling(next.castling);
        hash ^= ZOBRIST.en_passant(next.en_passant);
        next.hash = hash;
        next
    }
}

/// A rook leaving or being captured on its home corner ends that castling right.
fn clear_rook_right(position: &mut Position, color: Color, sq: Square) {
    let rank = color.back_rank();
    if sq == Square::at(rank, 0) {
        position.castling.remove(color, false);
    } else if sq == Square::at(rank, 7) {
        position.castling.remove(color, true);
    }
}
