// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod error;
pub mod puzzle;
pub mod search;

// Re-export the items callers normally need:
pub use error::{LayoutError, MoveError};
pub use puzzle::{is_piece_label, scramble, Board, Direction, Goal, Move, EMPTY, WALL};
pub use search::{
    GoalDistance, Scorer, SearchConfig, SearchStats, SearchStep, Solution, SolveOutcome, Solver,
};
