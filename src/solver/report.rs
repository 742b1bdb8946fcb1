//! Proof-game solutions and their reconstruction from the search arena.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{IllegalMoveError, Move, Position};

/// One search node: the move that reached it and the node it was played from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) parent: u32,
    pub(crate) mv: Move,
}

/// Index of the initial position in the arena.
pub(crate) const ROOT: u32 = 0;

impl Node {
    pub(crate) fn root() -> Self {
        Node {
            parent: ROOT,
            mv: Move::null(),
        }
    }
}

/// A shortest move sequence from the initial position to the target.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    /// Walk parent links from `leaf` back to the root.
    ///
    /// Returns `None` if the chain does not reach the root in exactly `depth`
    /// links, which would mean the arena is corrupt.
    pub(crate) fn reconstruct(arena: &[Node], leaf: u32, depth: u16) -> Option<Self> {
        let mut moves = Vec::with_capacity(usize::from(depth));
        let mut idx = leaf;
        while idx != ROOT {
            if moves.len() >= usize::from(depth) {
                return None;
            }
            let node = arena.get(idx as usize)?;
            moves.push(node.mv);
            idx = node.parent;
        }
        if moves.len() != usize::from(depth) {
            return None;
        }
        moves.reverse();
        Some(Solution { moves })
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Length in plies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Play the moves from the initial position and return where they lead.
    pub fn replay(&self) -> Result<Position, IllegalMoveError> {
        self.moves
            .iter()
            .try_fold(Position::initial(), |position, &mv| position.apply(mv))
    }

    /// Numbered SAN, e.g. `1. f3 e5 2. g4 Qh4#`.
    #[must_use]
    pub fn to_san(&self) -> String {
        let mut out = String::new();
        let mut position = Position::initial();
        for (ply, &mv) in self.moves.iter().enumerate() {
            if ply % 2 == 0 {
                if ply > 0 {
                    out.push(' ');
                }
                out.push_str(&format!("{}. ", ply / 2 + 1));
            } else {
                out.push(' ');
            }
            out.push_str(&position.move_to_san(mv));
            match position.apply(mv) {
                Ok(next) => position = next,
                Err(_) => break,
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// UCI moves separated by spaces.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fools_mate_arena() -> (Vec<Node>, u32) {
        let mut arena = vec![Node::root()];
        let mut position = Position::initial();
        let mut parent = ROOT;
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = position.parse_move(uci).unwrap();
            position = position.apply(mv).unwrap();
            arena.push(Node { parent, mv });
            parent = (arena.len() - 1) as u32;
        }
        (arena, parent)
    }

    #[test]
    fn test_reconstruct_walks_to_root() {
        let (arena, leaf) = fools_mate_arena();
        let solution = Solution::reconstruct(&arena, leaf, 4).unwrap();
        assert_eq!(solution.to_string(), "f2f3 e7e5 g2g4 d8h4");
        assert_eq!(solution.len(), 4);
        assert!(solution.replay().unwrap().is_checkmate());
    }

    #[test]
    fn test_reconstruct_rejects_wrong_depth() {
        let (arena, leaf) = fools_mate_arena();
        assert!(Solution::reconstruct(&arena, leaf, 3).is_none());
        assert!(Solution::reconstruct(&arena, leaf, 5).is_none());
    }

    #[test]
    fn test_empty_solution() {
        let solution = Solution::reconstruct(&[Node::root()], ROOT, 0).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.to_string(), "");
        assert_eq!(solution.to_san(), "");
        assert_eq!(solution.replay().unwrap(), Position::initial());
    }

    #[test]
    fn test_numbered_san() {
        let (arena, leaf) = fools_mate_arena();
        let solution = Solution::reconstruct(&arena, leaf, 4).unwrap();
        assert_eq!(solution.to_san(), "1. f3 e5 2. g4 Qh4#");
    }
}
