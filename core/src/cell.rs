use serde::{Deserialize, Serialize};

use crate::*;

/// One grid unit of a [`Field`].
///
/// The neighborhood and adjacency count are fixed once the field is built, only the open flag
/// changes during play and it never goes back to closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    neighborhood: Neighborhood,
    opened: bool,
    hazard: bool,
    adjacent_hazards: u8,
}

impl Cell {
    pub(crate) fn new(position: Position, size: Size) -> Self {
        Self {
            position,
            neighborhood: Neighborhood::around(position, size),
            opened: false,
            hazard: false,
            adjacent_hazards: 0,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    pub const fn is_hazard(&self) -> bool {
        self.hazard
    }

    /// Hazards inside this cell's neighborhood. Always 0 for a hazard cell.
    pub const fn adjacent_hazard_count(&self) -> u8 {
        self.adjacent_hazards
    }

    /// Returns `true` when the flag was newly set.
    pub(crate) fn set_hazard(&mut self) -> bool {
        !core::mem::replace(&mut self.hazard, true)
    }

    /// Returns `true` when the cell was closed before.
    pub(crate) fn open(&mut self) -> bool {
        !core::mem::replace(&mut self.opened, true)
    }

    pub(crate) fn set_adjacent_hazards(&mut self, count: u8) {
        self.adjacent_hazards = count;
    }
}
