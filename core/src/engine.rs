use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A game session: opens cells of the one [`Field`] it owns.
///
/// Serialized as the field plus the triggered hazard, the counters are rebuilt on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "EngineSnapshot", from = "EngineSnapshot")]
pub struct RevealEngine {
    field: Field,
    opened_count: CellCount,
    state: SessionState,
    triggered_hazard: Option<Position>,
}

#[derive(Clone, Serialize, Deserialize)]
struct EngineSnapshot {
    field: Field,
    triggered_hazard: Option<Position>,
}

impl From<EngineSnapshot> for RevealEngine {
    fn from(snapshot: EngineSnapshot) -> Self {
        let mut engine = Self::new(snapshot.field);
        if let Some(pos) = snapshot.triggered_hazard {
            engine.triggered_hazard = Some(pos);
            engine.state = SessionState::Lost;
        }
        engine
    }
}

impl From<RevealEngine> for EngineSnapshot {
    fn from(engine: RevealEngine) -> Self {
        Self {
            field: engine.field,
            triggered_hazard: engine.triggered_hazard,
        }
    }
}

impl RevealEngine {
    pub fn new(field: Field) -> Self {
        let opened_count = field.opened_count();
        let state = if opened_count == field.safe_cells() {
            SessionState::Won
        } else {
            SessionState::InProgress
        };
        Self {
            field,
            opened_count,
            state,
            triggered_hazard: None,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn into_field(self) -> Field {
        self.field
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The hazard that ended the game, if any.
    pub fn triggered_hazard(&self) -> Option<Position> {
        self.triggered_hazard
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn is_all_opened(&self) -> bool {
        self.opened_count == self.field.safe_cells()
    }

    /// Opens the cell at `pos`, cascading through zero-adjacency cells.
    ///
    /// Opening an already open cell is a no-op. Opening a hazard leaves it closed and fails with
    /// [`GameError::GameOver`], after which every open of a closed cell fails with
    /// [`GameError::AlreadyEnded`].
    pub fn open(&mut self, pos: Position) -> Result<RevealOutcome> {
        let cell = *self.field.get(pos)?;

        if cell.is_opened() {
            return Ok(RevealOutcome::NoChange);
        }
        self.check_not_finished()?;

        let opened = self.open_cascade(pos)?;
        if self.is_all_opened() {
            self.end_game(SessionState::Won);
            Ok(RevealOutcome::Won(opened))
        } else {
            Ok(RevealOutcome::Revealed(opened))
        }
    }

    /// Opens `start` and every cell reachable from it through zero-adjacency cells.
    ///
    /// The open flag doubles as the visited set: a cell is only expanded right after the call
    /// that flipped it, so each cell is opened and expanded at most once.
    fn open_cascade(&mut self, start: Position) -> Result<CellCount> {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(pos) = to_visit.pop_front() {
            let cell = *self.field.get(pos)?;
            if cell.is_hazard() {
                self.triggered_hazard = Some(pos);
                self.end_game(SessionState::Lost);
                return Err(GameError::GameOver);
            }
            if !self.field.mark_opened(pos)? {
                continue;
            }
            opened += 1;
            self.opened_count += 1;

            if cell.adjacent_hazard_count() == 0 {
                to_visit.extend(
                    cell.neighborhood()
                        .iter()
                        .filter(|&neighbor| !self.field[neighbor].is_opened()),
                );
            }
        }

        log::trace!("Opening {:?} revealed {} cells", start, opened);
        Ok(opened)
    }

    fn end_game(&mut self, state: SessionState) {
        if self.state.is_finished() {
            return;
        }

        match state {
            SessionState::Won => log::info!("Field cleared"),
            SessionState::Lost => {
                log::info!("Hazard at {:?} opened, game is lost", self.triggered_hazard)
            }
            SessionState::InProgress => return,
        }
        self.state = state;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
