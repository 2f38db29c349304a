use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for field height, width, and positions.
pub type Coord = usize;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = usize;

/// Field dimensions as `(height, width)`.
pub type Size = (Coord, Coord);

/// Zero-based `(row, col)` position inside a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Builds a position from user-facing signed input, negative values are out of bounds.
    pub fn from_signed(row: i64, col: i64) -> Result<Self> {
        match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Self { row, col }),
            _ => Err(GameError::OutOfBounds { row, col }),
        }
    }

    pub const fn is_within(self, (height, width): Size) -> bool {
        self.row < height && self.col < width
    }

    pub(crate) const fn to_nd_index(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self { row, col }
    }
}

/// Clipped rectangle of up to 3x3 positions centered on a cell, the cell included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub top_left: Position,
    pub bottom_right: Position,
}

impl Neighborhood {
    /// Boundary of `center` clamped to `[0, dim - 1]` on both axes.
    ///
    /// `center` must lie inside `size`.
    pub fn around(center: Position, (height, width): Size) -> Self {
        debug_assert!(center.is_within((height, width)));
        Self {
            top_left: Position::new(center.row.saturating_sub(1), center.col.saturating_sub(1)),
            bottom_right: Position::new(
                (center.row + 1).min(height - 1),
                (center.col + 1).min(width - 1),
            ),
        }
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.row >= self.top_left.row
            && pos.row <= self.bottom_right.row
            && pos.col >= self.top_left.col
            && pos.col <= self.bottom_right.col
    }

    /// Number of positions covered, 4 at a corner and up to 9 inside.
    pub const fn cell_count(&self) -> CellCount {
        (self.bottom_right.row - self.top_left.row + 1)
            * (self.bottom_right.col - self.top_left.col + 1)
    }

    /// Every position in the inclusive rectangle, row-major.
    pub fn iter(&self) -> NeighborhoodIter {
        NeighborhoodIter {
            bounds: *self,
            next: Some(self.top_left),
        }
    }
}

impl IntoIterator for Neighborhood {
    type Item = Position;
    type IntoIter = NeighborhoodIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct NeighborhoodIter {
    bounds: Neighborhood,
    next: Option<Position>,
}

impl Iterator for NeighborhoodIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let Neighborhood {
            top_left,
            bottom_right,
        } = self.bounds;

        self.next = if current.col < bottom_right.col {
            Some(Position::new(current.row, current.col + 1))
        } else if current.row < bottom_right.row {
            Some(Position::new(current.row + 1, top_left.col))
        } else {
            None
        };

        Some(current)
    }
}
