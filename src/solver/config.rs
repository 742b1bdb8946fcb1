//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ply budget.
pub const DEFAULT_MAX_PLIES: u16 = 8;
/// Default cap on distinct positions held in the visited map.
pub const DEFAULT_MAX_POSITIONS: usize = 20_000_000;
/// Default frontier size below which a level is expanded on one thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Knobs for a proof-game search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Maximum solution length in plies
    pub max_plies: u16,
    /// Worker threads used to expand a depth level (1 = sequential)
    pub threads: usize,
    /// Discard positions whose lower bound exceeds the remaining budget
    pub prune: bool,
    /// Give up once the visited map holds this many positions
    pub max_positions: usize,
    /// Smallest frontier that is split across threads
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_plies: DEFAULT_MAX_PLIES,
            threads: 1,
            prune: true,
            max_positions: DEFAULT_MAX_POSITIONS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Default configuration with the given ply budget.
    #[must_use]
    pub fn with_max_plies(max_plies: u16) -> Self {
        SolverConfig {
            max_plies,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn max_plies(mut self, max_plies: u16) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Set worker thread count (clamped to at least 1)
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[must_use]
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    #[must_use]
    pub fn max_positions(mut self, max_positions: usize) -> Self {
        // Arena indices are u32.
        self.max_positions = max_positions.min(u32::MAX as usize);
        self
    }

    #[must_use]
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Thread count actually used for a frontier of `frontier_len` positions.
    pub(crate) fn workers_for(&self, frontier_len: usize) -> usize {
        if self.threads <= 1 || frontier_len < self.parallel_threshold.max(2) {
            1
        } else {
            self.threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_plies, 8);
        assert_eq!(config.threads, 1);
        assert!(config.prune);
        assert_eq!(config.max_positions, 20_000_000);
    }

    #[test]
    fn test_builder_clamps_threads() {
        let config = SolverConfig::with_max_plies(4).threads(0).prune(false);
        assert_eq!(config.max_plies, 4);
        assert_eq!(config.threads, 1);
        assert!(!config.prune);
    }

    #[test]
    fn test_max_positions_fits_arena_index() {
        let config = SolverConfig::default().max_positions(usize::MAX);
        assert_eq!(config.max_positions, u32::MAX as usize);
        let config = SolverConfig::default().max_positions(10);
        assert_eq!(config.max_positions, 10);
    }

    #[test]
    fn test_workers_for_respects_threshold() {
        let config = SolverConfig::default().threads(4).parallel_threshold(100);
        assert_eq!(config.workers_for(99), 1);
        assert_eq!(config.workers_for(100), 4);
        assert_eq!(SolverConfig::default().workers_for(1_000_000), 1);
    }
}
