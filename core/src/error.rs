use thiserror::Error;

use crate::{CellCount, Coord, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Field size {height}x{width} is smaller than 3x3")]
    InvalidDimensions { height: Coord, width: Coord },
    #[error("Too many hazards: requested {requested}, at most {max} allowed")]
    TooManyHazards {
        requested: CellCount,
        max: CellCount,
    },
    #[error("Hazard layout holds {actual} distinct hazards, expected {expected}")]
    InvalidHazardLayout {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Position ({row}, {col}) is out of the field's boundary")]
    OutOfBounds { row: i64, col: i64 },
    #[error("Game is lost")]
    GameOver,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    pub(crate) fn out_of_bounds(pos: Position) -> Self {
        Self::OutOfBounds {
            row: i64::try_from(pos.row).unwrap_or(i64::MAX),
            col: i64::try_from(pos.col).unwrap_or(i64::MAX),
        }
    }

    /// Whether this is the expected end of a game rather than a usage error.
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
