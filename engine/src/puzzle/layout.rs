// engine/src/puzzle/layout.rs
#![forbid(unsafe_code)]

use crate::error::LayoutError;
use crate::puzzle::grid::{is_piece_label, Grid, EMPTY, WALL};

/// Goal declaration: the designated piece and the anchor cell its first
/// coordinate must reach exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goal {
    /// Label byte of the designated piece.
    pub piece: u8,
    /// Target anchor `(x, y)`.
    pub target: (i32, i32),
}

impl Goal {
    pub fn new(piece: char, x: i32, y: i32) -> Self {
        Self {
            piece: piece as u8,
            target: (x, y),
        }
    }
}

/// Parse a rectangular text layout into a [`Grid`].
///
/// Recognized symbols: `O` (wall), `0` (empty), lowercase piece labels.
/// The outermost ring must be all walls; interior walls are allowed and
/// behave as permanently immovable cells. Every malformed input fails here,
/// before a board ever exists.
pub(crate) fn parse_grid(text: &str) -> Result<Grid, LayoutError> {
    let rows: Vec<&[u8]> = text
        .trim()
        .lines()
        .map(|line| line.trim_end().as_bytes())
        .collect();

    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }

    let width = rows[0].len();
    let height = rows.len();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(LayoutError::RaggedRows {
                row,
                len: cells.len(),
                expected: width,
            });
        }
    }
    if width < 3 || height < 3 {
        return Err(LayoutError::TooSmall { width, height });
    }

    let mut cells = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            if c != WALL && c != EMPTY && !is_piece_label(c) {
                return Err(LayoutError::UnknownSymbol {
                    symbol: c as char,
                    x: x as i32,
                    y: y as i32,
                });
            }
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            if border && c != WALL {
                return Err(LayoutError::OpenBorder {
                    x: x as i32,
                    y: y as i32,
                });
            }
            cells.push(c);
        }
    }

    Ok(Grid::new(width, height, cells))
}
