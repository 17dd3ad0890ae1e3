// engine/src/search/solver.rs
#![forbid(unsafe_code)]

use rustc_hash::FxHashSet;

use crate::error::MoveError;
use crate::puzzle::{Board, Move};
use crate::search::frontier::Frontier;
use crate::search::node::{Arena, Node};
use crate::search::score::Scorer;

/// Search-order tuning.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Coefficient of depth in the ordering penalty
    /// `penalty = depth_weight * depth + heuristic`.
    ///
    /// Small and positive: ties among equally-defective states break toward
    /// shallower nodes without letting depth dominate heuristic improvement.
    /// This is approximate best-first, not admissible A*; the first solution
    /// found is returned with no shortest-path claim.
    pub depth_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth_weight: 0.5 }
    }
}

/// Running counters for one search.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: u64,
    /// Candidate moves simulated.
    pub generated: u64,
    /// Candidates discarded because their hash was already visited.
    pub duplicates: u64,
    /// Distinct states recorded so far (never decreases).
    pub visited: u64,
    /// Nodes currently awaiting expansion.
    pub frontier: usize,
    /// Largest frontier size seen.
    pub frontier_peak: usize,
    /// Deepest node created so far.
    pub max_depth: u32,
}

/// A discovered move sequence, root to goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    /// Chronological moves.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replay onto a board, validating every step against the legal run
    /// before applying it. Returns the final board.
    pub fn replay_on(&self, mut board: Board) -> Result<Board, MoveError> {
        for &mv in &self.moves {
            board.try_apply(mv)?;
        }
        Ok(board)
    }
}

/// Result of advancing the search by one expansion.
#[derive(Clone, Debug)]
pub enum SearchStep {
    /// One node expanded; more work may remain.
    Expanded,
    /// Goal reached; the run is over.
    Solved(Solution),
    /// Frontier empty with no goal: unsolvable from this configuration.
    /// Also returned for every step after a terminal state.
    Exhausted,
}

/// Terminal outcome of a full run.
#[derive(Clone, Debug)]
pub enum SolveOutcome {
    Solved(Solution),
    /// Normal terminal result, not an error: the reachable state space was
    /// exhausted without meeting the goal.
    Exhausted,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(s) => Some(s),
            SolveOutcome::Exhausted => None,
        }
    }
}

/// Best-first search over board configurations.
///
/// Owns its visited set and frontier outright; construct a fresh solver per
/// run. Sharing either across runs would silently treat one run's explored
/// states as pruned for another.
pub struct Solver<S: Scorer> {
    scorer: S,
    config: SearchConfig,
    arena: Arena,
    frontier: Frontier,
    visited: FxHashSet<u64>,
    stats: SearchStats,
    finished: bool,
}

impl<S: Scorer> Solver<S> {
    pub fn new(board: Board, scorer: S, config: SearchConfig) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(board.state_hash());

        let heuristic = scorer.score(&board);
        let mut arena = Arena::new();
        let root = arena.push(Node {
            board,
            parent: None,
            via: None,
            depth: 0,
        });
        let mut frontier = Frontier::new();
        frontier.push(heuristic, root);

        let stats = SearchStats {
            visited: 1,
            frontier: 1,
            frontier_peak: 1,
            ..SearchStats::default()
        };

        Self {
            scorer,
            config,
            arena,
            frontier,
            visited,
            stats,
            finished: false,
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Pop and expand the lowest-penalty node.
    ///
    /// Drives exactly one expansion so an external caller can interleave
    /// progress reporting or stop polling altogether.
    pub fn step(&mut self) -> SearchStep {
        if self.finished {
            return SearchStep::Exhausted;
        }
        let Some(id) = self.frontier.pop() else {
            self.finished = true;
            log::info!(
                "search exhausted: {} states visited, {} nodes expanded",
                self.stats.visited,
                self.stats.expanded
            );
            return SearchStep::Exhausted;
        };

        // Covers a board that is already solved at the root; children are
        // otherwise intercepted at simulation time below.
        if self.arena.get(id).board.is_goal() {
            self.finished = true;
            return SearchStep::Solved(Solution {
                moves: self.arena.path_from_root(id),
            });
        }

        self.stats.expanded += 1;
        let depth = self.arena.get(id).depth;
        let moves = self.arena.get(id).board.legal_moves();

        for mv in moves {
            let (hash, goal) = self.arena.get_mut(id).board.simulate(mv);
            self.stats.generated += 1;

            if self.visited.contains(&hash) {
                self.stats.duplicates += 1;
                continue;
            }

            if goal {
                let mut moves = self.arena.path_from_root(id);
                moves.push(mv);
                self.finished = true;
                self.stats.visited = self.visited.len() as u64;
                self.stats.frontier = self.frontier.len();
                log::info!(
                    "solution found: {} moves, {} states visited, {} nodes expanded",
                    moves.len(),
                    self.stats.visited,
                    self.stats.expanded
                );
                return SearchStep::Solved(Solution { moves });
            }

            self.visited.insert(hash);
            let mut child = self.arena.get(id).board.clone();
            child.apply(mv);
            let heuristic = self.scorer.score(&child);
            let child_depth = depth + 1;
            let penalty = self.config.depth_weight * f64::from(child_depth) + heuristic;

            let child_id = self.arena.push(Node {
                board: child,
                parent: Some(id),
                via: Some(mv),
                depth: child_depth,
            });
            self.frontier.push(penalty, child_id);
            self.stats.max_depth = self.stats.max_depth.max(child_depth);
        }

        self.stats.visited = self.visited.len() as u64;
        self.stats.frontier = self.frontier.len();
        self.stats.frontier_peak = self.frontier.peak();

        if self.stats.expanded % 10_000 == 0 {
            log::debug!(
                "expanded {} nodes, {} visited, frontier {}, depth {}",
                self.stats.expanded,
                self.stats.visited,
                self.stats.frontier,
                self.stats.max_depth
            );
        }

        SearchStep::Expanded
    }

    /// Run to a terminal state.
    pub fn run(&mut self) -> SolveOutcome {
        loop {
            match self.step() {
                SearchStep::Expanded => continue,
                SearchStep::Solved(solution) => return SolveOutcome::Solved(solution),
                SearchStep::Exhausted => return SolveOutcome::Exhausted,
            }
        }
    }

    /// Retained nodes (diagnostic; the arena never frees during a run).
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }
}
