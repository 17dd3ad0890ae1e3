// engine/src/error.rs
#![forbid(unsafe_code)]

//! Error types for board construction and move requests.
//!
//! Frontier exhaustion is deliberately *not* here: "no solution from this
//! configuration" is a normal search outcome, reported as a value.

use thiserror::Error;

use crate::puzzle::Direction;

/// Malformed configuration, rejected before a board exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("layout row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("layout must be at least 3x3 including the wall border, got {width}x{height}")]
    TooSmall { width: usize, height: usize },

    #[error("unrecognized symbol '{symbol}' at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: i32, y: i32 },

    #[error("border cell at ({x}, {y}) is not a wall")]
    OpenBorder { x: i32, y: i32 },

    #[error("goal piece '{piece}' does not occupy any cell")]
    MissingGoalPiece { piece: char },

    #[error("goal target ({x}, {y}) lies outside the board interior")]
    TargetOutsideInterior { x: i32, y: i32 },
}

/// Invalid move request, rejected before any mutation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece labelled '{piece}' on the board")]
    UnknownPiece { piece: char },

    #[error("piece '{piece}' cannot slide {dir} by {requested}; the legal run is {max}")]
    BlockedMove {
        piece: char,
        dir: Direction,
        requested: u32,
        max: u32,
    },
}
