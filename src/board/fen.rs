use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{CastlingRights, Color, Move, Piece, Position, Square};

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number are optional and ignored. An en
    /// passant square that no pawn of the side to move can capture onto is
    /// dropped, so FENs that differ only in that field parse to equal positions.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(rank, file).ok_or(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file + 1,
                })?;
                position.set_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.set(Color::White, true),
                    'Q' => castling.set(Color::White, false),
                    'k' => castling.set(Color::Black, true),
                    'q' => castling.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }
        position.castling = castling;

        position.en_passant = if parts[3] == "-" {
            None
        } else {
            let sq = parts[3]
                .parse::<Square>()
                .map_err(|_| FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?;
            Some(sq)
        };
        position.normalize_en_passant();

        position.hash = position.compute_hash();
        Ok(position)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// FEN of this position. The move counters are always written as `0 1`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::at(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!("{} {} {} {} 0 1", rows.join("/"), active, self.castling, ep)
    }

    /// Parse a move in UCI long algebraic notation (e.g. "e2e4", "e7e8q", "e1g1").
    ///
    /// Returns the matching legal move, which carries the right castling, en
    /// passant or double push tag.
    ///
    /// # Example
    /// ```
    /// use proof_game::board::Position;
    ///
    /// let position = Position::initial();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_pawn_push());
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if !uci.is_ascii() || uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a UCI move and return the position after it.
    ///
    /// # Example
    /// ```
    /// use proof_game::board::Position;
    ///
    /// let position = Position::initial()
    ///     .apply_uci("e2e4")
    ///     .and_then(|p| p.apply_uci("e7e5"))
    ///     .unwrap();
    /// assert_eq!(position.side_to_move(), proof_game::board::Color::White);
    /// ```
    pub fn apply_uci(&self, uci: &str) -> Result<Position, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.apply(mv).map_err(|_| MoveParseError::IllegalMove {
            notation: uci.to_string(),
        })
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_fen_round_trip() {
        let position = Position::try_from_fen(INITIAL).unwrap();
        assert_eq!(position.to_fen(), INITIAL);
        assert_eq!(position, Position::initial());
    }

    #[test]
    fn test_counters_are_optional() {
        let position =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
                .unwrap();
        assert_eq!(position, Position::initial());
    }

    #[test]
    fn test_unusable_en_passant_is_dropped() {
        let with_ep = Position::try_from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        let without = Position::try_from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(with_ep.en_passant_target(), None);
        assert_eq!(with_ep, without);
        assert_eq!(with_ep.zobrist(), without.zobrist());
    }

    #[test]
    fn test_usable_en_passant_is_kept() {
        let position =
            Position::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(position.en_passant_target(), Some(Square::at(5, 3)));
    }

    #[test]
    fn test_fen_errors() {
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::TooFewParts { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1"),
            Err(FenError::InvalidCastling { char: 'X' })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::WrongRankCount { found: 7 })
        ));
        assert!(matches!(
            Position::try_from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::WrongFileCount { rank: 6, files: 9 })
        ));
    }

    #[test]
    fn test_partial_castling() {
        let position =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1")
                .unwrap();
        let rights = position.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_parse_move() {
        let position = Position::initial();
        let mv = position.parse_move("e2e4").unwrap();
        assert_eq!(mv.from(), Square::at(1, 4));
        assert_eq!(mv.to(), Square::at(3, 4));
        assert!(mv.is_double_pawn_push());

        assert!(matches!(
            position.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            position.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            position.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_parse_promotion() {
        let position = Position::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        assert_eq!(
            position.parse_move("a7a8q").unwrap().promotion(),
            Some(Piece::Queen)
        );
        assert!(matches!(
            position.parse_move("a7a8p"),
            Err(MoveParseError::InvalidPromotion { char: 'p' })
        ));
        assert!(matches!(
            position.parse_move("a7a8"),
            Err(MoveParseError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_from_str_and_apply_uci() {
        let position: Position = INITIAL.parse().unwrap();
        let next = position.apply_uci("g1f3").unwrap();
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(
            next.piece_at(Square::at(2, 5)),
            Some((Color::White, Piece::Knight))
        );
    }
}
