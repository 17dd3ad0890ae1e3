// engine/src/puzzle/board.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{LayoutError, MoveError};
use crate::puzzle::grid::{is_piece_label, Grid, EMPTY};
use crate::puzzle::layout::{parse_grid, Goal};
use crate::puzzle::moves::{Direction, Move};
use crate::puzzle::state_hash;

#[derive(Clone, Debug, PartialEq, Eq)]
struct PieceState {
    /// Occupied cells in initial row-major scan order. The order never
    /// changes across moves, so `cells[0]` stays the positional anchor.
    cells: Vec<(i32, i32)>,
    fingerprint: u64,
}

/// Mutable board aggregate: grid, piece registry, interchangeable-shape
/// groups, and the goal declaration.
///
/// Invariant: every non-wall, non-empty grid cell holds exactly one piece
/// label, and that label's coordinate list contains the cell exactly once.
/// Constructed once per run, mutated in place by [`Board::apply`] during
/// simulation, and deep-cloned whenever a transition is retained as a new
/// search state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    pieces: BTreeMap<u8, PieceState>,
    /// Shape groups in canonical order; fixed at construction.
    groups: Vec<Vec<u8>>,
    goal: Goal,
}

impl Board {
    /// Build a board from a text layout and a goal declaration.
    pub fn parse(text: &str, goal: Goal) -> Result<Self, LayoutError> {
        Self::from_grid(parse_grid(text)?, goal)
    }

    fn from_grid(grid: Grid, goal: Goal) -> Result<Self, LayoutError> {
        let mut pieces: BTreeMap<u8, PieceState> = BTreeMap::new();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let c = grid.cell(x, y);
                if is_piece_label(c) {
                    pieces
                        .entry(c)
                        .or_insert_with(|| PieceState {
                            cells: Vec::new(),
                            fingerprint: 0,
                        })
                        .cells
                        .push((x, y));
                }
            }
        }
        for st in pieces.values_mut() {
            let (ax, ay) = st.cells[0];
            st.fingerprint = state_hash::fingerprint(ax, ay);
        }

        if !pieces.contains_key(&goal.piece) {
            return Err(LayoutError::MissingGoalPiece {
                piece: goal.piece as char,
            });
        }
        let (tx, ty) = goal.target;
        if tx < 1 || ty < 1 || tx >= grid.width() as i32 - 1 || ty >= grid.height() as i32 - 1 {
            return Err(LayoutError::TargetOutsideInterior { x: tx, y: ty });
        }

        let groups =
            state_hash::shape_groups(pieces.iter().map(|(&l, st)| (l, st.cells.as_slice())));

        Ok(Self {
            grid,
            pieces,
            groups,
            goal,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Cell byte at `(x, y)`; wall for out-of-bounds coordinates.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        self.grid.cell(x, y)
    }

    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.grid.is_empty(x, y)
    }

    /// Piece labels in ascending label order.
    pub fn piece_labels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pieces.keys().copied()
    }

    /// Occupied cells of a piece, in anchor-first order.
    pub fn piece_cells(&self, piece: u8) -> Option<&[(i32, i32)]> {
        self.pieces.get(&piece).map(|st| st.cells.as_slice())
    }

    /// First coordinate of a piece (its positional fingerprint anchor).
    pub fn anchor(&self, piece: u8) -> Option<(i32, i32)> {
        self.pieces.get(&piece).map(|st| st.cells[0])
    }

    // -------------------------------------------------------------------------
    // Move legality
    // -------------------------------------------------------------------------

    /// Maximal contiguous slide distance for `piece` in `dir`. Zero means the
    /// piece is immovable in that direction.
    pub fn legal_run(&self, piece: u8, dir: Direction) -> Result<u32, MoveError> {
        let st = self.pieces.get(&piece).ok_or(MoveError::UnknownPiece {
            piece: piece as char,
        })?;
        Ok(self.run_for(piece, &st.cells, dir))
    }

    fn run_for(&self, label: u8, cells: &[(i32, i32)], dir: Direction) -> u32 {
        let (dx, dy) = dir.delta();
        let mut run: u32 = 0;
        loop {
            // A cell the piece itself still covers never blocks the slide.
            let d = (run + 1) as i32;
            let clear = cells.iter().all(|&(x, y)| {
                let c = self.grid.cell(x + dx * d, y + dy * d);
                c == EMPTY || c == label
            });
            if !clear {
                return run;
            }
            run += 1;
        }
    }

    fn move_is_legal(&self, mv: Move) -> bool {
        mv.distance >= 1
            && self
                .legal_run(mv.piece, mv.dir)
                .is_ok_and(|max| mv.distance <= max)
    }

    /// Per-direction maximal runs for every piece that can move at all.
    /// Runs are indexed by [`Direction::idx`].
    pub fn move_ranges(&self) -> Vec<(u8, [u32; 4])> {
        let mut out = Vec::new();
        for (&label, st) in &self.pieces {
            let mut runs = [0u32; 4];
            for dir in Direction::ALL {
                runs[dir.idx()] = self.run_for(label, &st.cells, dir);
            }
            if runs.iter().any(|&r| r > 0) {
                out.push((label, runs));
            }
        }
        out
    }

    /// Every legal `(piece, direction, distance)` candidate, distances
    /// `1..=max` inclusive, in deterministic label/direction/distance order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::new();
        for (piece, runs) in self.move_ranges() {
            for dir in Direction::ALL {
                for distance in 1..=runs[dir.idx()] {
                    out.push(Move {
                        piece,
                        dir,
                        distance,
                    });
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Apply a pre-validated move.
    ///
    /// Caller contract: `1 <= mv.distance <= legal_run(mv.piece, mv.dir)`.
    /// Violating it corrupts the board invariant; debug builds assert.
    pub fn apply(&mut self, mv: Move) {
        debug_assert!(self.move_is_legal(mv), "illegal move: {mv}");
        let (dx, dy) = mv.dir.delta();
        let shift = mv.distance as i32;
        let st = match self.pieces.get_mut(&mv.piece) {
            Some(st) => st,
            None => return,
        };
        for &(x, y) in &st.cells {
            self.grid.set(x, y, EMPTY);
        }
        for c in &mut st.cells {
            c.0 += dx * shift;
            c.1 += dy * shift;
        }
        for &(x, y) in &st.cells {
            self.grid.set(x, y, mv.piece);
        }
        let (ax, ay) = st.cells[0];
        st.fingerprint = state_hash::fingerprint(ax, ay);
    }

    /// Validate a requested move against the current legal run, then apply.
    /// On rejection the board is left untouched.
    pub fn try_apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let max = self.legal_run(mv.piece, mv.dir)?;
        if mv.distance == 0 || mv.distance > max {
            return Err(MoveError::BlockedMove {
                piece: mv.piece as char,
                dir: mv.dir,
                requested: mv.distance,
                max,
            });
        }
        self.apply(mv);
        Ok(())
    }

    /// Apply a legal move, capture `(state_hash, is_goal)`, then undo via the
    /// exact inverse. The board is bit-for-bit identical before and after.
    pub fn simulate(&mut self, mv: Move) -> (u64, bool) {
        debug_assert!(self.move_is_legal(mv), "illegal move: {mv}");
        self.apply(mv);
        let hash = self.state_hash();
        let goal = self.is_goal();
        self.apply(mv.inverse());
        (hash, goal)
    }

    // -------------------------------------------------------------------------
    // Identity and goal
    // -------------------------------------------------------------------------

    /// Canonical state hash. Configurations differing only by a swap of
    /// same-shape pieces hash identically.
    pub fn state_hash(&self) -> u64 {
        state_hash::combine_groups(&self.groups, |label| self.pieces[&label].fingerprint)
    }

    /// Exact goal check: the designated piece's anchor sits on the target.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.anchor(self.goal.piece) == Some(self.goal.target)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.fmt(f)
    }
}
