//! Breadth-first proof-game search.
//!
//! Depth levels are expanded one at a time. Every position first reached at
//! depth `d` sits in the level-`d` frontier together with an arena index that
//! leads back to the root; the visited map keeps later transpositions out.
//! Because levels are finished in order and successors are merged in frontier
//! order and move-generation order, the first match is a shortest solution and
//! the same one on every run.

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{IllegalMoveError, Move, Position};
use crate::sync::StopFlag;

use super::bounds::TargetProfile;
use super::parallel::expand_parallel;
use super::report::{Node, Solution, ROOT};
use super::{SolveError, SolveOutcome, SolverConfig};

/// Counters describing one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Frontier positions whose moves were generated
    pub nodes_expanded: u64,
    /// Successor positions built
    pub successors_generated: u64,
    /// Successors dropped because they were reached earlier
    pub duplicates: u64,
    /// Successors dropped by the lower bound
    pub pruned: u64,
    /// Largest frontier held at once
    pub peak_frontier: usize,
    /// Deepest level whose successors were examined
    pub depth_reached: u16,
}

impl SearchStats {
    fn absorb(&mut self, expansion: &Expansion) {
        self.nodes_expanded += expansion.expanded;
        self.successors_generated += expansion.generated;
        self.duplicates += expansion.duplicates;
        self.pruned += expansion.pruned;
    }
}

pub(crate) struct FrontierEntry {
    position: Position,
    node: u32,
}

/// Read-only inputs shared by every expansion within one depth level.
pub(crate) struct Level<'a> {
    target: &'a Position,
    profile: Option<&'a TargetProfile>,
    visited: &'a FxHashSet<Position>,
    child_depth: u16,
    max_plies: u16,
}

impl Level<'_> {
    fn is_last(&self) -> bool {
        self.child_depth >= self.max_plies
    }
}

pub(crate) enum Candidate {
    Target { parent: u32, mv: Move },
    Fresh { parent: u32, mv: Move, position: Position },
}

/// Successors of a run of frontier entries, in frontier and move order.
pub(crate) struct Expansion {
    candidates: Vec<Candidate>,
    expanded: u64,
    generated: u64,
    duplicates: u64,
    pruned: u64,
}

impl Expansion {
    pub(crate) fn found_target(&self) -> bool {
        matches!(self.candidates.last(), Some(Candidate::Target { .. }))
    }
}

/// Expand `entries`, stopping right after the first successor equal to the target.
///
/// Successors already in the visited map of earlier levels are dropped here;
/// duplicates within the level are left for the merge.
pub(crate) fn expand(
    entries: &[FrontierEntry],
    level: &Level<'_>,
) -> Result<Expansion, IllegalMoveError> {
    let mut out = Expansion {
        candidates: Vec::new(),
        expanded: 0,
        generated: 0,
        duplicates: 0,
        pruned: 0,
    };

    for entry in entries {
        out.expanded += 1;
        for &mv in entry.position.legal_moves().iter() {
            let next = entry.position.apply(mv)?;
            out.generated += 1;

            if next == *level.target {
                out.candidates.push(Candidate::Target {
                    parent: entry.node,
                    mv,
                });
                return Ok(out);
            }
            if level.is_last() {
                continue;
            }
            if level.visited.contains(&next) {
                out.duplicates += 1;
                continue;
            }
            if let Some(profile) = level.profile {
                if !profile.admits(&next, level.child_depth, level.max_plies) {
                    out.pruned += 1;
                    continue;
                }
            }
            out.candidates.push(Candidate::Fresh {
                parent: entry.node,
                mv,
                position: next,
            });
        }
    }
    Ok(out)
}

pub(crate) struct Search<'a> {
    config: &'a SolverConfig,
    target: &'a Position,
    profile: Option<TargetProfile>,
    stop: Option<&'a StopFlag>,
    arena: Vec<Node>,
    visited: FxHashSet<Position>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        config: &'a SolverConfig,
        target: &'a Position,
        stop: Option<&'a StopFlag>,
    ) -> Self {
        Search {
            config,
            target,
            profile: config.prune.then(|| TargetProfile::new(target)),
            stop,
            arena: vec![Node::root()],
            visited: FxHashSet::default(),
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn run(mut self) -> Result<SolveOutcome, SolveError> {
        let max_plies = self.config.max_plies;
        let root = Position::initial();

        if root == *self.target {
            info!("target is the initial position");
            return Ok(SolveOutcome::Solved {
                solution: Solution::default(),
                stats: self.stats,
            });
        }

        self.visited.insert(root.clone());
        let mut frontier = vec![FrontierEntry {
            position: root,
            node: ROOT,
        }];
        self.stats.peak_frontier = 1;

        for depth in 0..max_plies {
            if self.stop.is_some_and(StopFlag::is_stopped) {
                warn!("proof-game search stopped after {} plies", depth);
                return Err(SolveError::Stopped { depth });
            }
            if frontier.is_empty() {
                break;
            }

            let child_depth = depth + 1;
            self.stats.depth_reached = child_depth;
            let mut next = Vec::new();
            let workers = self.config.workers_for(frontier.len());

            let found = if workers > 1 {
                let expansions = {
                    let level = self.level(child_depth);
                    expand_parallel(&frontier, &level, workers)?
                };
                let mut found = None;
                for expansion in expansions {
                    found = self.merge(expansion, &mut next, child_depth)?;
                    if found.is_some() {
                        break;
                    }
                }
                found
            } else {
                let mut found = None;
                for entry in &frontier {
                    let expansion = {
                        let level = self.level(child_depth);
                        expand(std::slice::from_ref(entry), &level)?
                    };
                    found = self.merge(expansion, &mut next, child_depth)?;
                    if found.is_some() {
                        break;
                    }
                }
                found
            };

            if let Some(leaf) = found {
                let solution = Solution::reconstruct(&self.arena, leaf, child_depth)
                    .ok_or(SolveError::Internal { depth: child_depth })?;
                info!(
                    "proof game of {} plies found after {} positions",
                    child_depth,
                    self.visited.len()
                );
                return Ok(SolveOutcome::Solved {
                    solution,
                    stats: self.stats,
                });
            }

            debug!(
                "depth {}: frontier {} visited {} pruned {} duplicates {}",
                child_depth,
                next.len(),
                self.visited.len(),
                self.stats.pruned,
                self.stats.duplicates
            );
            self.stats.peak_frontier = self.stats.peak_frontier.max(next.len());
            frontier = next;
        }

        info!(
            "no proof game within {} plies ({} positions visited)",
            max_plies,
            self.visited.len()
        );
        Ok(SolveOutcome::NoSolutionWithinBudget {
            max_plies,
            stats: self.stats,
        })
    }

    fn level(&self, child_depth: u16) -> Level<'_> {
        Level {
            target: self.target,
            profile: self.profile.as_ref(),
            visited: &self.visited,
            child_depth,
            max_plies: self.config.max_plies,
        }
    }

    /// Fold an expansion into the arena, the visited map and the next frontier.
    /// Returns the arena index of the target if the expansion reached it.
    fn merge(
        &mut self,
        expansion: Expansion,
        next: &mut Vec<FrontierEntry>,
        child_depth: u16,
    ) -> Result<Option<u32>, SolveError> {
        self.stats.absorb(&expansion);

        for candidate in expansion.candidates {
            match candidate {
                Candidate::Target { parent, mv } => {
                    return self.push_node(parent, mv, child_depth).map(Some);
                }
                Candidate::Fresh {
                    parent,
                    mv,
                    position,
                } => {
                    if self.visited.contains(&position) {
                        self.stats.duplicates += 1;
                        continue;
                    }
                    if self.visited.len() >= self.config.max_positions {
                        warn!(
                            "visited map reached {} positions at depth {}",
                            self.visited.len(),
                            child_depth
                        );
                        return Err(SolveError::LimitExceeded {
                            max_positions: self.config.max_positions,
                            depth: child_depth,
                        });
                    }
                    let node = self.push_node(parent, mv, child_depth)?;
                    self.visited.insert(position.clone());
                    next.push(FrontierEntry { position, node });
                }
            }
        }
        Ok(None)
    }

    fn push_node(&mut self, parent: u32, mv: Move, depth: u16) -> Result<u32, SolveError> {
        let idx = u32::try_from(self.arena.len()).map_err(|_| SolveError::LimitExceeded {
            max_positions: self.config.max_positions,
            depth,
        })?;
        self.arena.push(Node { parent, mv });
        Ok(idx)
    }
}
