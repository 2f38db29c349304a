use core::ops::Index;
use ndarray::{Array2, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Smallest accepted height and width.
pub const MIN_SIDE: Coord = 3;

/// Validated generation parameters.
///
/// Only obtainable through [`FieldConfig::new`], deserializing goes through the same checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldConfig")]
pub struct FieldConfig {
    height: Coord,
    width: Coord,
    hazards: CellCount,
}

#[derive(Deserialize)]
struct RawFieldConfig {
    height: Coord,
    width: Coord,
    hazards: CellCount,
}

impl TryFrom<RawFieldConfig> for FieldConfig {
    type Error = GameError;

    fn try_from(raw: RawFieldConfig) -> Result<Self> {
        Self::new(raw.height, raw.width, raw.hazards)
    }
}

impl FieldConfig {
    pub(crate) const fn new_unchecked((height, width): Size, hazards: CellCount) -> Self {
        Self {
            height,
            width,
            hazards,
        }
    }

    /// Both sides must be at least [`MIN_SIDE`], and at most half of the cells (rounded down)
    /// may hold a hazard.
    pub fn new(height: Coord, width: Coord, hazards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked((height, width), hazards);
        config.validate()?;
        Ok(config)
    }

    /// Checks dimensions first, then the hazard count.
    pub fn validate(&self) -> Result<()> {
        if self.height < MIN_SIDE || self.width < MIN_SIDE {
            return Err(GameError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }

        let max = self.max_hazards();
        if self.hazards > max {
            return Err(GameError::TooManyHazards {
                requested: self.hazards,
                max,
            });
        }

        Ok(())
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn size(&self) -> Size {
        (self.height, self.width)
    }

    pub const fn hazards(&self) -> CellCount {
        self.hazards
    }

    pub const fn total_cells(&self) -> CellCount {
        self.height.saturating_mul(self.width)
    }

    pub const fn max_hazards(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.hazards
    }
}

/// The playing field: a fixed `height x width` grid of [`Cell`]s.
///
/// Built once by a [`FieldGenerator`] (or [`Field::with_hazards`]), after that the only change
/// is cells being opened through [`Field::mark_opened`].
///
/// Deserializing only trusts the shape, the hazard flags and the open flags of a snapshot,
/// everything derived from them is rebuilt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSnapshot")]
pub struct Field {
    cells: Array2<Cell>,
    hazard_count: CellCount,
}

#[derive(Deserialize)]
struct FieldSnapshot {
    cells: Array2<Cell>,
}

impl TryFrom<FieldSnapshot> for Field {
    type Error = GameError;

    fn try_from(snapshot: FieldSnapshot) -> Result<Self> {
        let (height, width) = snapshot.cells.dim();
        let hazards = snapshot.cells.iter().filter(|cell| cell.is_hazard()).count();
        FieldConfig::new(height, width, hazards)?;

        let mut field = Self::blank((height, width));
        Zip::from(&mut field.cells)
            .and(&snapshot.cells)
            .for_each(|cell, stored| {
                if stored.is_hazard() {
                    cell.set_hazard();
                } else if stored.is_opened() {
                    cell.open();
                }
            });
        field.hazard_count = hazards;

        field.fill_adjacent_hazards();
        Ok(field)
    }
}

impl Field {
    /// Closed, hazard-free grid with every neighborhood precomputed.
    pub(crate) fn blank(size: Size) -> Self {
        let cells =
            Array2::from_shape_fn(size, |(row, col)| Cell::new(Position::new(row, col), size));
        Self {
            cells,
            hazard_count: 0,
        }
    }

    /// Builds a field with hazards at exactly the given positions.
    ///
    /// Duplicate positions count once. Fails with the same validation errors as
    /// [`FieldConfig::new`], or with [`GameError::OutOfBounds`] for a position outside the field.
    pub fn with_hazards(height: Coord, width: Coord, hazards: &[Position]) -> Result<Self> {
        FieldConfig::new(height, width, 0)?;

        let mut field = Self::blank((height, width));
        for &pos in hazards {
            let pos = field.validate(pos)?;
            field.place_hazard(pos);
        }
        FieldConfig::new(height, width, field.hazard_count)?;

        field.fill_adjacent_hazards();
        Ok(field)
    }

    /// Marks `pos` as a hazard, returns `false` if it already was one.
    pub(crate) fn place_hazard(&mut self, pos: Position) -> bool {
        let placed = self.cells[pos.to_nd_index()].set_hazard();
        if placed {
            self.hazard_count += 1;
        }
        placed
    }

    /// Stores the hazard count of every safe cell's neighborhood, hazard cells keep 0.
    pub(crate) fn fill_adjacent_hazards(&mut self) {
        let counts = self.cells.map(|cell| {
            if cell.is_hazard() {
                0
            } else {
                self.count_hazards_in(cell.neighborhood())
            }
        });

        Zip::from(&mut self.cells)
            .and(&counts)
            .for_each(|cell, &count| cell.set_adjacent_hazards(count));
    }

    fn count_hazards_in(&self, neighborhood: Neighborhood) -> u8 {
        let count = neighborhood
            .iter()
            .filter(|&pos| self[pos].is_hazard())
            .count();
        // a neighborhood never spans more than 9 cells
        count as u8
    }

    pub fn config(&self) -> FieldConfig {
        FieldConfig::new_unchecked(self.size(), self.hazard_count)
    }

    pub fn size(&self) -> Size {
        self.cells.dim()
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.hazard_count
    }

    pub fn opened_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_opened()).count()
    }

    pub fn validate(&self, pos: Position) -> Result<Position> {
        if pos.is_within(self.size()) {
            Ok(pos)
        } else {
            Err(GameError::out_of_bounds(pos))
        }
    }

    pub fn get(&self, pos: Position) -> Result<&Cell> {
        let pos = self.validate(pos)?;
        Ok(&self[pos])
    }

    /// Opens the cell at `pos`, returns whether it was closed before.
    ///
    /// This does not look at hazards or cascade, that is the job of [`RevealEngine::open`].
    pub fn mark_opened(&mut self, pos: Position) -> Result<bool> {
        let pos = self.validate(pos)?;
        Ok(self.cells[pos.to_nd_index()].open())
    }

    /// Whether every safe cell is open. Hazard cells are not considered.
    pub fn is_all_opened(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_opened() || cell.is_hazard())
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn hazard_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.is_hazard())
            .map(Cell::position)
    }
}

impl Index<Position> for Field {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

/// Result of a successful [`RevealEngine::open`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The target was already open.
    NoChange,
    /// This many cells were opened, the game goes on.
    Revealed(CellCount),
    /// This many cells were opened and no safe cell is left closed.
    Won(CellCount),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn opened(self) -> CellCount {
        match self {
            Self::NoChange => 0,
            Self::Revealed(count) | Self::Won(count) => count,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn positions(coords: &[(Coord, Coord)]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    /// `None` marks a hazard, whose count is never read.
    fn assert_adjacency(field: &Field, expected: &[&[Option<u8>]]) {
        for (row, expected_row) in expected.iter().enumerate() {
            for (col, expected_count) in expected_row.iter().enumerate() {
                let cell = &field[Position::new(row, col)];
                match expected_count {
                    None => assert!(cell.is_hazard(), "({row}, {col}) should be a hazard"),
                    Some(count) => assert_eq!(
                        cell.adjacent_hazard_count(),
                        *count,
                        "adjacent hazards at ({row}, {col})"
                    ),
                }
            }
        }
    }

    #[test]
    fn config_rejects_small_sides() {
        assert_eq!(
            FieldConfig::new(2, 5, 0),
            Err(GameError::InvalidDimensions {
                height: 2,
                width: 5
            })
        );
        assert_eq!(
            FieldConfig::new(5, 2, 0),
            Err(GameError::InvalidDimensions {
                height: 5,
                width: 2
            })
        );
    }

    #[test]
    fn config_checks_dimensions_before_hazards() {
        assert!(matches!(
            FieldConfig::new(2, 2, 100),
            Err(GameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn config_allows_up_to_half_the_cells_rounded_down() {
        assert!(FieldConfig::new(3, 3, 4).is_ok());
        assert_eq!(
            FieldConfig::new(3, 3, 5),
            Err(GameError::TooManyHazards {
                requested: 5,
                max: 4
            })
        );
        assert!(FieldConfig::new(4, 4, 8).is_ok());
        assert!(FieldConfig::new(4, 4, 9).is_err());
    }

    #[test]
    fn single_center_hazard_forms_a_ring() {
        let field = Field::with_hazards(5, 5, &positions(&[(2, 2)])).unwrap();

        assert_adjacency(
            &field,
            &[
                &[Some(0), Some(0), Some(0), Some(0), Some(0)],
                &[Some(0), Some(1), Some(1), Some(1), Some(0)],
                &[Some(0), Some(1), None, Some(1), Some(0)],
                &[Some(0), Some(1), Some(1), Some(1), Some(0)],
                &[Some(0), Some(0), Some(0), Some(0), Some(0)],
            ],
        );
    }

    #[test]
    fn adjacency_counts_with_edge_and_corner_hazards() {
        let field = Field::with_hazards(4, 4, &positions(&[(0, 0), (2, 2), (3, 3)])).unwrap();

        assert_adjacency(
            &field,
            &[
                &[None, Some(1), Some(0), Some(0)],
                &[Some(1), Some(2), Some(1), Some(1)],
                &[Some(0), Some(1), None, Some(2)],
                &[Some(0), Some(1), Some(2), None],
            ],
        );
        assert_eq!(field[Position::new(1, 1)].adjacent_hazard_count(), 2);
        assert_eq!(field[Position::new(0, 1)].adjacent_hazard_count(), 1);
        assert_eq!(field[Position::new(2, 3)].adjacent_hazard_count(), 2);
        assert_eq!(field[Position::new(1, 3)].adjacent_hazard_count(), 1);
    }

    #[test]
    fn hazard_cells_keep_zero_count() {
        let field = Field::with_hazards(3, 3, &positions(&[(1, 1), (0, 0)])).unwrap();

        assert_eq!(field[Position::new(1, 1)].adjacent_hazard_count(), 0);
        assert_eq!(field[Position::new(0, 0)].adjacent_hazard_count(), 0);
        assert_eq!(field[Position::new(0, 1)].adjacent_hazard_count(), 2);
    }

    #[test]
    fn with_hazards_collapses_duplicates() {
        let field = Field::with_hazards(3, 3, &positions(&[(1, 1), (1, 1)])).unwrap();

        assert_eq!(field.hazard_count(), 1);
        assert_eq!(field.hazard_positions().collect::<Vec<_>>(), positions(&[(1, 1)]));
    }

    #[test]
    fn with_hazards_rejects_outside_positions() {
        assert_eq!(
            Field::with_hazards(3, 3, &positions(&[(3, 0)])),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
    }

    #[test]
    fn get_is_bounds_checked() {
        let field = Field::with_hazards(3, 4, &[]).unwrap();

        assert!(field.get(Position::new(2, 3)).is_ok());
        assert_eq!(
            field.get(Position::new(3, 0)),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            field.get(Position::new(0, 4)),
            Err(GameError::OutOfBounds { row: 0, col: 4 })
        );
    }

    #[test]
    fn is_all_opened_ignores_hazards() {
        let mut field = Field::with_hazards(3, 3, &positions(&[(0, 0)])).unwrap();
        assert!(!field.is_all_opened());

        let safe: Vec<_> = field
            .cells()
            .filter(|cell| !cell.is_hazard())
            .map(Cell::position)
            .collect();
        let (last, rest) = safe.split_last().unwrap();
        for &pos in rest {
            assert!(field.mark_opened(pos).unwrap());
        }
        assert!(!field.is_all_opened());

        field.mark_opened(*last).unwrap();
        assert!(field.is_all_opened());
        assert_eq!(field.opened_count(), field.safe_cells());
    }

    #[test]
    fn mark_opened_reports_state_change() {
        let mut field = Field::with_hazards(3, 3, &[]).unwrap();

        assert_eq!(field.mark_opened(Position::new(1, 2)), Ok(true));
        assert_eq!(field.mark_opened(Position::new(1, 2)), Ok(false));
        assert!(field.mark_opened(Position::new(1, 3)).is_err());
    }

    #[test]
    fn rows_follow_field_shape() {
        let field = Field::with_hazards(3, 5, &[]).unwrap();
        let rows: Vec<_> = field.rows().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 5));
        assert_eq!(rows[2][4].position(), Position::new(2, 4));
    }

    #[test]
    fn config_accessors_match_arguments() {
        let config = FieldConfig::new(4, 7, 3).unwrap();

        assert_eq!(config.height(), 4);
        assert_eq!(config.width(), 7);
        assert_eq!(config.size(), (4, 7));
        assert_eq!(config.hazards(), 3);
        assert_eq!(config.safe_cells(), 25);
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config: FieldConfig =
            serde_json::from_str(r#"{"height":3,"width":4,"hazards":6}"#).unwrap();
        assert_eq!(config, FieldConfig::new(3, 4, 6).unwrap());

        for json in [
            r#"{"height":2,"width":2,"hazards":2}"#,
            r#"{"height":3,"width":3,"hazards":9}"#,
        ] {
            assert!(serde_json::from_str::<FieldConfig>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn config_roundtrips_through_field() {
        let config = FieldConfig::new(5, 3, 2).unwrap();
        let field = FixedFieldGenerator::new([Position::new(0, 0), Position::new(4, 2)])
            .generate(config)
            .unwrap();

        assert_eq!(field.config(), config);
    }

    #[test]
    fn deserialized_field_rebuilds_neighborhoods_and_counts() {
        let mut field = Field::with_hazards(3, 3, &positions(&[(0, 0)])).unwrap();
        field.mark_opened(Position::new(2, 2)).unwrap();

        let mut json = serde_json::to_value(&field).unwrap();
        let first = &mut json["cells"]["data"][0];
        first["neighborhood"]["bottom_right"]["row"] = 99.into();
        json["cells"]["data"][1]["adjacent_hazards"] = 7.into();
        json["hazard_count"] = 5.into();

        let restored: Field = serde_json::from_value(json).unwrap();

        assert_eq!(restored, field);
        assert_eq!(
            restored[Position::new(0, 0)].neighborhood(),
            Neighborhood::around(Position::new(0, 0), (3, 3))
        );
        assert!(restored[Position::new(2, 2)].is_opened());
    }

    #[test]
    fn deserialized_field_is_validated() {
        let hazards = positions(&[(0, 0), (0, 1), (0, 2), (1, 0)]);
        let field = Field::with_hazards(3, 3, &hazards).unwrap();

        let mut json = serde_json::to_value(&field).unwrap();
        json["cells"]["data"][8]["hazard"] = true.into();

        assert!(serde_json::from_value::<Field>(json).is_err());
    }
}
