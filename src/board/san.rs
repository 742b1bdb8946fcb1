//! Standard Algebraic Notation (SAN) support.
//!
//! Solutions are reported as move lists; SAN is how a human reads them back.
//! Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#".
//!
//! # Examples
//! ```
//! use proof_game::board::Position;
//!
//! let position = Position::initial();
//! let mv = position.parse_san("e4").unwrap();
//! assert_eq!(position.move_to_san(mv), "e4");
//! ```

use super::error::SanError;
use super::{Move, Piece, Position, Square};

impl Position {
    /// Format a legal move in Standard Algebraic Notation, with a `+` or `#` suffix.
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let mut san = String::new();

        if mv.is_castling() {
            san.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else {
            let piece = self.piece_at(mv.from()).map(|(_, piece)| piece);
            let is_capture = mv.is_en_passant() || self.piece_at(mv.to()).is_some();

            match piece {
                Some(Piece::Pawn) | None => {
                    if is_capture {
                        san.push(file_char(mv.from()));
                    }
                }
                Some(p) => {
                    san.push(p.to_char().to_ascii_uppercase());
                    let (needs_file, needs_rank) = self.needs_disambiguation(mv, p);
                    if needs_file {
                        san.push(file_char(mv.from()));
                    }
                    if needs_rank {
                        san.push(rank_char(mv.from()));
                    }
                }
            }

            if is_capture {
                san.push('x');
            }
            san.push_str(&mv.to().to_string());

            if let Some(promo) = mv.promotion() {
                san.push('=');
                san.push(promo.to_char().to_ascii_uppercase());
            }
        }

        if let Ok(next) = self.apply(mv) {
            if next.is_checkmate() {
                san.push('#');
            } else if next.is_in_check(next.side_to_move()) {
                san.push('+');
            }
        }

        san
    }

    /// Returns (`needs_file`, `needs_rank`) for a piece move.
    fn needs_disambiguation(&self, mv: Move, piece: Piece) -> (bool, bool) {
        let rivals: Vec<Square> = self
            .legal_moves()
            .iter()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.piece_at(m.from()).map(|(_, p)| p) == Some(piece)
            })
            .map(|m| m.from())
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }
        let same_file = rivals.iter().any(|sq| sq.file() == mv.from().file());
        let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from().rank());
        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a move in Standard Algebraic Notation.
    ///
    /// Accepts "e4", "Nf3", "Bxc6", "R1d2", "O-O" (or "0-0"), "e8=Q", with an
    /// optional `+` or `#` suffix.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let text = san.trim().trim_end_matches(['+', '#', '!', '?']);
        if text.is_empty() {
            return Err(SanError::Empty);
        }

        match text {
            "O-O" | "0-0" => return self.find_castling_move(true, san),
            "O-O-O" | "0-0-0" => return self.find_castling_move(false, san),
            _ => {}
        }

        let mut chars: Vec<char> = text.chars().collect();

        let piece = if chars[0].is_ascii_uppercase() {
            let c = chars.remove(0);
            match Piece::from_char(c) {
                Some(p) if p != Piece::Pawn => p,
                _ => return Err(SanError::InvalidPiece { char: c }),
            }
        } else {
            Piece::Pawn
        };

        let promotion = match chars.iter().position(|&c| c == '=') {
            Some(eq) => {
                let c = chars.get(eq + 1).copied().unwrap_or('=');
                let promo = match Piece::from_char(c) {
                    Some(p) if !matches!(p, Piece::Pawn | Piece::King) => p,
                    _ => return Err(SanError::InvalidPromotion { char: c }),
                };
                chars.truncate(eq);
                Some(promo)
            }
            None => None,
        };

        if chars.len() < 2 {
            return Err(SanError::InvalidSquare {
                notation: chars.iter().collect(),
            });
        }
        let dest_text: String = chars[chars.len() - 2..].iter().collect();
        let dest: Square = dest_text
            .parse()
            .map_err(|_| SanError::InvalidSquare { notation: dest_text })?;

        let mut file = None;
        let mut rank = None;
        for &c in &chars[..chars.len() - 2] {
            match c {
                'a'..='h' => file = Some(c as usize - 'a' as usize),
                '1'..='8' => rank = Some(c as usize - '1' as usize),
                'x' | ':' | '-' => {}
                _ => {
                    return Err(SanError::InvalidSquare {
                        notation: text.to_string(),
                    })
                }
            }
        }

        let matching: Vec<Move> = self
            .legal_moves()
            .iter()
            .copied()
            .filter(|mv| {
                mv.to() == dest
                    && !mv.is_castling()
                    && mv.promotion() == promotion
                    && self.piece_at(mv.from()).map(|(_, p)| p) == Some(piece)
                    && file.map_or(true, |f| mv.from().file() == f)
                    && rank.map_or(true, |r| mv.from().rank() == r)
            })
            .collect();

        match matching.as_slice() {
            [] => Err(SanError::NoMatchingMove {
                san: san.to_string(),
            }),
            [mv] => Ok(*mv),
            _ => Err(SanError::AmbiguousMove {
                san: san.to_string(),
            }),
        }
    }

    fn find_castling_move(&self, kingside: bool, san: &str) -> Result<Move, SanError> {
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.is_castling() && mv.is_castle_kingside() == kingside)
            .ok_or_else(|| SanError::NoMatchingMove {
                san: san.to_string(),
            })
    }

    /// Parse a SAN move and return the position after it.
    pub fn apply_san(&self, san: &str) -> Result<Position, SanError> {
        let mv = self.parse_san(san)?;
        self.apply(mv).map_err(|_| SanError::NoMatchingMove {
            san: san.to_string(),
        })
    }
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_and_knight() {
        let position = Position::initial();
        let mv = position.parse_san("e4").unwrap();
        assert_eq!(mv.from(), Square::at(1, 4));
        assert_eq!(mv.to(), Square::at(3, 4));
        assert_eq!(position.move_to_san(mv), "e4");

        let mv = position.parse_san("Nf3").unwrap();
        assert_eq!(mv.from(), Square::at(0, 6));
        assert_eq!(position.move_to_san(mv), "Nf3");
    }

    #[test]
    fn test_castling() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let mv = position.parse_san("O-O").unwrap();
        assert!(mv.is_castle_kingside());
        assert_eq!(position.move_to_san(mv), "O-O");

        let mv = position.parse_san("0-0-0").unwrap();
        assert!(mv.is_castling() && !mv.is_castle_kingside());
        assert_eq!(position.move_to_san(mv), "O-O-O");
    }

    #[test]
    fn test_captures() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        let mv = position.parse_san("exd5").unwrap();
        assert_eq!(position.move_to_san(mv), "exd5");
    }

    #[test]
    fn test_en_passant_capture() {
        let position = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = position.parse_san("exd6").unwrap();
        assert!(mv.is_en_passant());
        assert_eq!(position.move_to_san(mv), "exd6");
    }

    #[test]
    fn test_promotion() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let mv = position.parse_san("a8=Q").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        assert_eq!(position.move_to_san(mv), "a8=Q");
        assert!(matches!(
            position.parse_san("a8=K"),
            Err(SanError::InvalidPromotion { char: 'K' })
        ));
    }

    #[test]
    fn test_disambiguation() {
        let position = Position::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1");
        assert_eq!(position.parse_san("Rad4").unwrap().from().file(), 0);
        let mv = position.parse_san("Rhd4").unwrap();
        assert_eq!(mv.from().file(), 7);
        assert_eq!(position.move_to_san(mv), "Rhd4+");
        assert_eq!(position.parse_san("Rhd4+").unwrap(), mv);

        let quiet = Position::from_fen("1k6/8/8/8/R6R/8/8/4K3 w - - 0 1");
        let mv = quiet.parse_san("Rhd4").unwrap();
        assert_eq!(quiet.move_to_san(mv), "Rhd4");
        assert!(matches!(
            position.parse_san("Rd4"),
            Err(SanError::AmbiguousMove { .. })
        ));
    }

    #[test]
    fn test_check_and_mate_suffix() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mv = position.parse_san("Rh8").unwrap();
        assert_eq!(position.move_to_san(mv), "Rh8+");

        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        let mv = position.parse_san("Qh4#").unwrap();
        assert_eq!(position.move_to_san(mv), "Qh4#");
    }

    #[test]
    fn test_errors() {
        let position = Position::initial();
        assert_eq!(position.parse_san("  "), Err(SanError::Empty));
        assert!(matches!(
            position.parse_san("Xe4"),
            Err(SanError::InvalidPiece { char: 'X' })
        ));
        assert!(matches!(
            position.parse_san("e5"),
            Err(SanError::NoMatchingMove { .. })
        ));
    }

    #[test]
    fn test_every_initial_move_reparses() {
        let position = Position::initial();
        for &mv in position.legal_moves().iter() {
            let san = position.move_to_san(mv);
            assert_eq!(position.parse_san(&san).unwrap(), mv);
        }
    }
}
