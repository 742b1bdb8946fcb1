//! Chess position model and move generation.
//!
//! Positions are immutable bitboard values. [`Position::apply`] returns the
//! successor and [`Position::legal_moves`] enumerates legal moves in a fixed
//! order. Equality and hashing cover placement, side to move, castling rights
//! and the en passant target, which makes positions usable as keys of a
//! visited set.
//!
//! # Example
//! ```
//! use proof_game::board::Position;
//!
//! let position = Position::initial();
//! let moves = position.legal_moves();
//! assert_eq!(moves.len(), 20);
//! let next = position.apply(moves[0]).unwrap();
//! assert_ne!(next, position);
//! ```

mod apply;
mod attack_tables;
mod builder;
mod error;
mod fen;
mod movegen;
mod san;
mod state;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{
    FenError, IllegalMoveError, IllegalMoveReason, InvalidTargetError, MoveParseError, SanError,
    SquareError, TargetDefect,
};
pub use state::Position;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    SpecialMove, Square,
};

pub(crate) use types::PROMOTION_PIECES;
