// engine/src/puzzle/scramble.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::puzzle::board::Board;
use crate::puzzle::moves::{Direction, Move};

/// Randomized setup: walk the board away from its start configuration with
/// `steps` uniformly chosen legal single-cell slides from a seeded stream.
///
/// Deterministic for a given `(board, seed, steps)`. Stops early if the board
/// ever has no legal move. Returns the moves actually applied, in order, so a
/// caller can log or invert the walk.
pub fn scramble(board: &mut Board, seed: u64, steps: u32) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut applied = Vec::with_capacity(steps as usize);

    for _ in 0..steps {
        let mut candidates: Vec<Move> = Vec::new();
        for (piece, runs) in board.move_ranges() {
            for dir in Direction::ALL {
                if runs[dir.idx()] >= 1 {
                    candidates.push(Move {
                        piece,
                        dir,
                        distance: 1,
                    });
                }
            }
        }
        let Some(&mv) = candidates.choose(&mut rng) else {
            break;
        };
        board.apply(mv);
        applied.push(mv);
    }

    applied
}
