// engine/src/puzzle/moves.rs
#![forbid(unsafe_code)]

use std::fmt;

/// Axis direction of a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(dx, dy)` step for this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Fixed lookup slot in `0..4`, matching the order of [`Direction::ALL`].
    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// One slide: a piece, a direction, and a distance of at least one cell.
///
/// Generalizes the once/twice move pairs of hand-rolled sliding-puzzle move
/// tables into a single distance field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// Piece label byte (lowercase ASCII).
    pub piece: u8,
    pub dir: Direction,
    /// Cells travelled; `1..=legal_run(piece, dir)`.
    pub distance: u32,
}

impl Move {
    /// The move that exactly undoes this one.
    #[inline]
    pub fn inverse(self) -> Self {
        Self {
            piece: self.piece,
            dir: self.dir.opposite(),
            distance: self.distance,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.piece as char, self.dir, self.distance)
    }
}
