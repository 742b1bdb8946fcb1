//! Shortest proof-game search.
//!
//! Given a target position, find a shortest sequence of legal moves that
//! leads from the initial position to it, within a ply budget.
//!
//! # Example
//! ```
//! use proof_game::board::Position;
//! use proof_game::solver::{solve, SolveOutcome};
//!
//! let target = Position::initial().apply_uci("e2e4").unwrap();
//! match solve(&target, 2).unwrap() {
//!     SolveOutcome::Solved { solution, .. } => assert_eq!(solution.to_string(), "e2e4"),
//!     SolveOutcome::NoSolutionWithinBudget { .. } => unreachable!(),
//! }
//! ```

mod bounds;
mod config;
mod engine;
mod parallel;
mod report;

use std::fmt;

use log::warn;

use crate::board::{IllegalMoveError, InvalidTargetError, Position};
use crate::sync::StopFlag;

pub use config::{
    SolverConfig, DEFAULT_MAX_PLIES, DEFAULT_MAX_POSITIONS, DEFAULT_PARALLEL_THRESHOLD,
};
pub use engine::SearchStats;
pub use report::Solution;

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A shortest proof game
    Solved {
        solution: Solution,
        stats: SearchStats,
    },
    /// Every line of at most `max_plies` plies was examined without reaching the target
    NoSolutionWithinBudget { max_plies: u16, stats: SearchStats },
}

impl SolveOutcome {
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved { solution, .. } => Some(solution),
            SolveOutcome::NoSolutionWithinBudget { .. } => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Solved { solution, .. } => Some(solution),
            SolveOutcome::NoSolutionWithinBudget { .. } => None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        match self {
            SolveOutcome::Solved { stats, .. }
            | SolveOutcome::NoSolutionWithinBudget { stats, .. } => stats,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved { .. })
    }
}

/// Why a search could not run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A move failed to apply during expansion
    IllegalMove(IllegalMoveError),
    /// The target fails the structural checks
    InvalidTarget(InvalidTargetError),
    /// The stop flag was set; `depth` plies had been fully searched
    Stopped { depth: u16 },
    /// The visited map hit `max_positions` while expanding to `depth`
    LimitExceeded { max_positions: usize, depth: u16 },
    /// Path reconstruction did not lead back to the initial position
    Internal { depth: u16 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::IllegalMove(err) => write!(f, "{err}"),
            SolveError::InvalidTarget(err) => write!(f, "{err}"),
            SolveError::Stopped { depth } => {
                write!(f, "Search stopped after {depth} plies")
            }
            SolveError::LimitExceeded {
                max_positions,
                depth,
            } => write!(
                f,
                "Position limit of {max_positions} exceeded while searching depth {depth}"
            ),
            SolveError::Internal { depth } => {
                write!(f, "Solution path at depth {depth} does not reach the initial position")
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::IllegalMove(err) => Some(err),
            SolveError::InvalidTarget(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IllegalMoveError> for SolveError {
    fn from(err: IllegalMoveError) -> Self {
        SolveError::IllegalMove(err)
    }
}

impl From<InvalidTargetError> for SolveError {
    fn from(err: InvalidTargetError) -> Self {
        SolveError::InvalidTarget(err)
    }
}

/// A reusable solver with a fixed configuration and an optional stop flag.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    stop: Option<StopFlag>,
}

impl Solver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Solver { config, stop: None }
    }

    /// Poll `flag` between depth levels and give up once it is set.
    #[must_use]
    pub fn with_stop_flag(mut self, flag: StopFlag) -> Self {
        self.stop = Some(flag);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Search for a shortest proof game reaching `target`.
    pub fn solve(&self, target: &Position) -> Result<SolveOutcome, SolveError> {
        if let Err(err) = target.validate_target() {
            warn!("rejecting target {}: {}", target.to_fen(), err);
            return Err(err.into());
        }
        engine::Search::new(&self.config, target, self.stop.as_ref()).run()
    }
}

/// Search with the default configuration and the given ply budget.
pub fn solve(target: &Position, max_plies: u16) -> Result<SolveOutcome, SolveError> {
    solve_with(target, &SolverConfig::with_max_plies(max_plies))
}

/// Search with an explicit configuration.
pub fn solve_with(target: &Position, config: &SolverConfig) -> Result<SolveOutcome, SolveError> {
    Solver::new(config.clone()).solve(target)
}
