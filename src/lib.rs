//! Shortest proof-game solver for standard chess.
//!
//! A proof game is a sequence of legal moves from the initial position that
//! ends in a given target position. [`solver::solve`] searches breadth-first
//! and returns a shortest one within a ply budget.
//!
//! ```
//! use proof_game::{solve, Position};
//!
//! let target =
//!     Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
//! let outcome = solve(&target, 4).unwrap();
//! let solution = outcome.solution().unwrap();
//! assert_eq!(solution.to_san(), "1. f3 e5 2. g4 Qh4#");
//! ```

pub mod board;
pub mod solver;
pub mod sync;
mod zobrist;

pub use board::{Color, Move, Piece, Position, PositionBuilder, Square};
pub use solver::{solve, solve_with, SolveError, SolveOutcome, Solver, SolverConfig};
pub use sync::StopFlag;
