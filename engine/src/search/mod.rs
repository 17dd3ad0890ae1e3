// engine/src/search/mod.rs
#![forbid(unsafe_code)]

mod frontier;
mod node;
mod score;
mod solver;

/**
 * Curated search public API.
 *
 * Internal implementation modules remain private; only stable entrypoints are re-exported.
 */
pub use score::{GoalDistance, Scorer};
pub use solver::{
    SearchConfig, SearchStats, SearchStep, Solution, SolveOutcome, Solver,
};
