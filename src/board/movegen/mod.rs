//! Legal move generation.
//!
//! Moves come out in a fixed order: pieces by type (pawn, knight, bishop,
//! rook, queen, king), then by ascending source square, then by ascending
//! destination square. Promotions are emitted queen, rook, bishop, knight and
//! castling follows the king's ordinary moves. The solver's tie-break between
//! equally short proof games rests on this order being stable.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{Move, MoveList, Piece, Position};

impl Position {
    /// All legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut legal = MoveList::new();
        self.for_each_legal(|mv, _| legal.push(mv));
        legal
    }

    /// Visit every legal move together with its successor position.
    pub(crate) fn for_each_legal(&self, mut visit: impl FnMut(Move, &Position)) {
        let side = self.side_to_move;
        let opponent = side.opponent();
        self.generate_pseudo_moves(&mut |mv: Move, piece: Piece| {
            if mv.is_castling() && self.castling_path_attacked(mv, opponent) {
                return;
            }
            let next = self.apply_unchecked(mv, piece);
            if !next.is_in_check(side) {
                visit(mv, &next);
            }
        });
    }

    fn generate_pseudo_moves(&self, emit: &mut impl FnMut(Move, Piece)) {
        let side = self.side_to_move;
        for from in self.pieces_of(side, Piece::Pawn).iter() {
            self.generate_pawn_moves(from, emit);
        }
        for from in self.pieces_of(side, Piece::Knight).iter() {
            self.generate_knight_moves(from, emit);
        }
        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in self.pieces_of(side, piece).iter() {
                self.generate_slider_moves(from, piece, emit);
            }
        }
        for from in self.pieces_of(side, Piece::King).iter() {
            self.generate_king_moves(from, emit);
        }
    }

    /// The side to move is in check and has no legal move.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    /// The side to move is not in check and has no legal move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    fn has_legal_move(&self) -> bool {
        let mut any = false;
        self.for_each_legal(|_, _| any = true);
        any
    }

    /// Count leaf nodes of the legal move tree to `depth` plies.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        if depth == 1 {
            return self.legal_moves().len() as u64;
        }

        let mut nodes = 0;
        self.for_each_legal(|_, next| nodes += next.perft(depth - 1));
        nodes
    }
}
