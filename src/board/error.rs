//! Error types for board operations.

use std::fmt;

use super::{Color, Move, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Placement does not have exactly eight ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly eight files
    WrongFileCount { rank: usize, files: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in SAN
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in SAN")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in SAN '{notation}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
            SanError::NoMatchingMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for SanError {}

/// Why a move could not be applied to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The source square holds no piece of the side to move
    NoPieceToMove,
    /// The destination holds a piece of the side to move
    OwnPieceOnTarget,
    /// The destination holds a king, which is never captured
    KingCapture,
    /// The piece cannot reach the destination from the source
    UnreachableTarget,
    /// A pawn reaches the last rank without a promotion piece, or promotes elsewhere
    PromotionMismatch,
    /// The special-move tag does not describe this move
    SpecialTagMismatch,
    /// Castling without the right, the pieces in place, or an empty path
    CastlingNotAllowed,
    /// En passant onto a square other than the recorded target
    EnPassantNotAllowed,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMoveReason::NoPieceToMove => "no piece of the side to move on the source square",
            IllegalMoveReason::OwnPieceOnTarget => "destination occupied by own piece",
            IllegalMoveReason::KingCapture => "destination holds a king",
            IllegalMoveReason::UnreachableTarget => "piece cannot reach the destination",
            IllegalMoveReason::PromotionMismatch => "promotion does not match the pawn's move",
            IllegalMoveReason::SpecialTagMismatch => "special-move tag does not match the move",
            IllegalMoveReason::CastlingNotAllowed => "castling is not available",
            IllegalMoveReason::EnPassantNotAllowed => "en passant is not available",
        };
        f.write_str(text)
    }
}

/// A move inconsistent with the position it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMoveError {
    pub mv: Move,
    pub reason: IllegalMoveReason,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal move '{}': {}", self.mv, self.reason)
    }
}

impl std::error::Error for IllegalMoveError {}

/// A structural defect that makes a target position unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDefect {
    /// A side does not have exactly one king
    KingCount { color: Color, found: u32 },
    /// A pawn stands on the first or eighth rank
    PawnOnBackRank { square: Square },
    /// A side has more than sixteen pieces
    TooManyPieces { color: Color, found: u32 },
    /// A side has more than eight pawns
    TooManyPawns { color: Color, found: u32 },
    /// A side has more promoted pieces than it has missing pawns
    TooManyPromotedPieces { color: Color, promoted: u32, missing_pawns: u32 },
    /// The side that just moved is left in check
    OpponentInCheck { color: Color },
    /// A castling right without king and rook on their home squares
    CastlingWithoutPieces { color: Color, kingside: bool },
    /// The en passant target cannot follow a double pawn push
    InvalidEnPassant { square: Square },
}

impl fmt::Display for TargetDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetDefect::KingCount { color, found } => {
                write!(f, "{color} has {found} kings, expected exactly 1")
            }
            TargetDefect::PawnOnBackRank { square } => {
                write!(f, "pawn on back rank square {square}")
            }
            TargetDefect::TooManyPieces { color, found } => {
                write!(f, "{color} has {found} pieces, at most 16 allowed")
            }
            TargetDefect::TooManyPawns { color, found } => {
                write!(f, "{color} has {found} pawns, at most 8 allowed")
            }
            TargetDefect::TooManyPromotedPieces {
                color,
                promoted,
                missing_pawns,
            } => write!(
                f,
                "{color} needs {promoted} promotions but only {missing_pawns} pawns are missing"
            ),
            TargetDefect::OpponentInCheck { color } => {
                write!(f, "{color} is in check but it is not their move")
            }
            TargetDefect::CastlingWithoutPieces { color, kingside } => {
                let side = if *kingside { "kingside" } else { "queenside" };
                write!(f, "{color} keeps {side} castling without king and rook at home")
            }
            TargetDefect::InvalidEnPassant { square } => {
                write!(f, "en passant target {square} does not follow a double pawn push")
            }
        }
    }
}

/// A target position that no sequence of legal moves can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTargetError {
    pub defect: TargetDefect,
}

impl fmt::Display for InvalidTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid target position: {}", self.defect)
    }
}

impl std::error::Error for InvalidTargetError {}

impl From<TargetDefect> for InvalidTargetError {
    fn from(defect: TargetDefect) -> Self {
        InvalidTargetError { defect }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_too_few_parts() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_san_error_ambiguous() {
        let err = SanError::AmbiguousMove {
            san: "Nc3".to_string(),
        };
        assert!(err.to_string().contains("Nc3"));
    }

    #[test]
    fn test_illegal_move_error_names_move() {
        let e2 = Square::from_index(12);
        let e5 = Square::from_index(36);
        let err = IllegalMoveError {
            mv: Move::new(e2, e5),
            reason: IllegalMoveReason::UnreachableTarget,
        };
        let text = err.to_string();
        assert!(text.contains("e2e5"));
        assert!(text.contains("cannot reach"));
    }

    #[test]
    fn test_target_defect_display() {
        let err = InvalidTargetError::from(TargetDefect::KingCount {
            color: Color::White,
            found: 3,
        });
        assert!(err.to_string().contains("White has 3 kings"));
    }
}
