//! Fluent builder for target positions.
//!
//! Proof-game targets are usually written as FEN, but tests and callers that
//! construct positions programmatically can place pieces one by one.
//!
//! # Example
//! ```
//! use proof_game::board::{Color, Piece, PositionBuilder, Square};
//!
//! let e1: Square = "e1".parse().unwrap();
//! let e8: Square = "e8".parse().unwrap();
//! let target = PositionBuilder::new()
//!     .piece(e1, Color::White, Piece::King)
//!     .piece(e8, Color::Black, Piece::King)
//!     .side_to_move(Color::Black)
//!     .build();
//! assert_eq!(target.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
//! ```

use super::{CastlingRights, Color, Piece, Position, Square};

/// A fluent builder for [`Position`] values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    placement: [Option<(Color, Piece)>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// An empty board, white to move, no castling rights.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            placement: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
        }
    }

    /// Start from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let initial = Position::initial();
        let mut builder = Self::new();
        for idx in 0..64 {
            builder.placement[idx] = initial.piece_at(Square::from_index(idx));
        }
        builder.castling = initial.castling_rights();
        builder
    }

    /// Place a piece, replacing whatever stood on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.placement[square.index()] = Some((color, piece));
        self
    }

    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.placement[square.index()] = None;
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling.set(color, true);
        self
    }

    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling.set(color, false);
        self
    }

    #[must_use]
    pub fn all_castling_rights(mut self) -> Self {
        self.castling = CastlingRights::all();
        self
    }

    #[must_use]
    pub fn no_castling_rights(mut self) -> Self {
        self.castling = CastlingRights::none();
        self
    }

    /// Record an en passant target. It is kept only if a pawn of the side to
    /// move can actually capture onto it.
    #[must_use]
    pub fn en_passant(mut self, target: Square) -> Self {
        self.en_passant = Some(target);
        self
    }

    #[must_use]
    pub fn clear_en_passant(mut self) -> Self {
        self.en_passant = None;
        self
    }

    /// Build the position. No legality checks are made here; see
    /// [`Position::validate_target`].
    #[must_use]
    pub fn build(self) -> Position {
        let mut position = Position::empty();
        for (idx, slot) in self.placement.iter().enumerate() {
            if let Some((color, piece)) = *slot {
                position.set_piece(Square::from_index(idx), color, piece);
            }
        }
        position.side_to_move = self.side_to_move;
        position.castling = self.castling;
        position.en_passant = self.en_passant;
        position.normalize_en_passant();
        position.hash = position.compute_hash();
        position
    }
}
