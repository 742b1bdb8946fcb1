use std::fmt;
use std::hash::{Hash, Hasher};

use crate::zobrist::ZOBRIST;

use super::attack_tables::PAWN_ATTACKS;
use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// Full game state of a proof-game search node.
///
/// A `Position` is an immutable value: [`Position::apply`] returns a new
/// position and never touches the source. Equality and hashing cover the
/// piece placement, the side to move, the castling rights and the en passant
/// target, so transpositions compare equal and hash identically.
#[derive(Clone)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) hash: u64,
}

impl Position {
    /// The standard initial position, white to move, all castling rights.
    #[must_use]
    pub fn initial() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            position.set_piece(Square::at(0, file), Color::White, *piece);
            position.set_piece(Square::at(7, file), Color::Black, *piece);
            position.set_piece(Square::at(1, file), Color::White, Piece::Pawn);
            position.set_piece(Square::at(6, file), Color::Black, Piece::Pawn);
        }

        position.castling = CastlingRights::all();
        position.hash = position.compute_hash();
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            hash: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// The en passant target square, recorded only when a capture onto it is possible.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// The 64-bit Zobrist key of this position.
    #[inline]
    #[must_use]
    pub fn zobrist(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        Bitboard(self.occupied[0].0 | self.occupied[1].0)
    }

    /// Number of pieces (king included) a color has on the board.
    #[inline]
    #[must_use]
    pub fn count(&self, color: Color) -> u32 {
        self.occupied[color.index()].popcount()
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, Piece::King).lsb()
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let color = if self.occupied[0].contains(sq) {
            Color::White
        } else if self.occupied[1].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces[color.index()][piece.index()].contains(sq))
            .map(|piece| (color, piece))
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied().contains(sq)
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].set(sq);
        self.occupied[color.index()].set(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].clear(sq);
        self.occupied[color.index()].clear(sq);
    }

    /// Hash recomputed from scratch; `apply` keeps `hash` equal to this incrementally.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        hash ^= ZOBRIST.side(self.side_to_move);
        hash ^= ZOBRIST.castling(self.castling);
        hash ^= ZOBRIST.en_passant(self.en_passant);
        hash
    }

    /// Whether a pawn of the side to move could capture en passant onto `target`.
    pub(crate) fn en_passant_capturable(&self, target: Square) -> bool {
        let capturers = PAWN_ATTACKS[self.side_to_move.opponent().index()][target.index()];
        capturers & self.pieces_of(self.side_to_move, Piece::Pawn).0 != 0
    }

    /// Drop an en passant target that no pawn can use.
    pub(crate) fn normalize_en_passant(&mut self) {
        if let Some(target) = self.en_passant {
            if !self.en_passant_capturable(target) {
                self.en_passant = None;
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::initial()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}

/// Board diagram, rank 8 on top, followed by the FEN.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square::at(rank, file))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_counts() {
        let position = Position::initial();
        assert_eq!(position.count(Color::White), 16);
        assert_eq!(position.count(Color::Black), 16);
        assert_eq!(position.pieces_of(Color::White, Piece::Pawn).popcount(), 8);
        assert_eq!(position.king_square(Color::Black), Some(Square::at(7, 4)));
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling_rights(), CastlingRights::all());
        assert_eq!(position.en_passant_target(), None);
    }

    #[test]
    fn test_piece_at() {
        let position = Position::initial();
        assert_eq!(
            position.piece_at(Square::at(0, 3)),
            Some((Color::White, Piece::Queen))
        );
        assert_eq!(
            position.piece_at(Square::at(6, 0)),
            Some((Color::Black, Piece::Pawn))
        );
        assert_eq!(position.piece_at(Square::at(4, 4)), None);
    }

    #[test]
    fn test_hash_matches_recomputation() {
        let position = Position::initial();
        assert_eq!(position.zobrist(), position.compute_hash());
    }

    #[test]
    fn test_equality_includes_side_to_move() {
        let white = Position::initial();
        let mut black = Position::initial();
        black.side_to_move = Color::Black;
        black.hash = black.compute_hash();
        assert_ne!(white, black);
        assert_ne!(white.zobrist(), black.zobrist());
    }

    #[test]
    fn test_display_has_diagram_and_fen() {
        let text = Position::initial().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.ends_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }
}
