//! Structural checks on target positions.
//!
//! These rule out placements that no game from the initial position can
//! produce, so the solver can reject them before spending any search effort.
//! Passing every check does not make a target reachable.

use super::apply::rook_castle_squares;
use super::error::{InvalidTargetError, TargetDefect};
use super::{Bitboard, Color, Piece, Position, Square};

impl Position {
    /// Check that this position could be the end of a legal game.
    pub fn validate_target(&self) -> Result<(), InvalidTargetError> {
        for color in Color::BOTH {
            self.check_material(color)?;
        }

        let back_ranks = Bitboard::RANK_1.0 | Bitboard::RANK_8.0;
        for color in Color::BOTH {
            let stray = self.pieces_of(color, Piece::Pawn).0 & back_ranks;
            if let Some(square) = Bitboard(stray).lsb() {
                return Err(TargetDefect::PawnOnBackRank { square }.into());
            }
        }

        let waiting = self.side_to_move.opponent();
        if self.is_in_check(waiting) {
            return Err(TargetDefect::OpponentInCheck { color: waiting }.into());
        }

        for color in Color::BOTH {
            for kingside in [true, false] {
                if self.castling.has(color, kingside) && !self.castling_pieces_home(color, kingside)
                {
                    return Err(TargetDefect::CastlingWithoutPieces { color, kingside }.into());
                }
            }
        }

        if let Some(square) = self.en_passant {
            if !self.en_passant_consistent(square) {
                return Err(TargetDefect::InvalidEnPassant { square }.into());
            }
        }

        Ok(())
    }

    fn check_material(&self, color: Color) -> Result<(), TargetDefect> {
        let kings = self.pieces_of(color, Piece::King).popcount();
        if kings != 1 {
            return Err(TargetDefect::KingCount { color, found: kings });
        }

        let total = self.count(color);
        if total > 16 {
            return Err(TargetDefect::TooManyPieces {
                color,
                found: total,
            });
        }

        let pawns = self.pieces_of(color, Piece::Pawn).popcount();
        if pawns > 8 {
            return Err(TargetDefect::TooManyPawns { color, found: pawns });
        }

        // Bishops are counted per square colour: a second bishop on the same
        // colour is a promoted one.
        let bishops = self.pieces_of(color, Piece::Bishop).0;
        let light = (bishops & Bitboard::LIGHT_SQUARES.0).count_ones();
        let dark = (bishops & !Bitboard::LIGHT_SQUARES.0).count_ones();
        let promoted = excess(self.pieces_of(color, Piece::Queen).popcount(), 1)
            + excess(self.pieces_of(color, Piece::Rook).popcount(), 2)
            + excess(self.pieces_of(color, Piece::Knight).popcount(), 2)
            + excess(light, 1)
            + excess(dark, 1);
        let missing_pawns = 8 - pawns;
        if promoted > missing_pawns {
            return Err(TargetDefect::TooManyPromotedPieces {
                color,
                promoted,
                missing_pawns,
            });
        }
        Ok(())
    }

    fn castling_pieces_home(&self, color: Color, kingside: bool) -> bool {
        let king_home = Square::at(color.back_rank(), 4);
        let (rook_home, _) = rook_castle_squares(color, kingside);
        self.pieces_of(color, Piece::King).contains(king_home)
            && self.pieces_of(color, Piece::Rook).contains(rook_home)
    }

    /// The target must sit behind an enemy pawn that just made a double push,
    /// with the push's start square and the target itself empty.
    fn en_passant_consistent(&self, square: Square) -> bool {
        let pusher = self.side_to_move.opponent();
        let dir = pusher.pawn_direction();
        let (Some(landed), Some(start)) = (square.offset(dir, 0), square.offset(-dir, 0)) else {
            return false;
        };
        landed.rank() == pusher.double_push_rank()
            && self.pieces_of(pusher, Piece::Pawn).contains(landed)
            && self.is_empty(square)
            && self.is_empty(start)
    }
}

fn excess(count: u32, base: u32) -> u32 {
    count.saturating_sub(base)
}
