use std::io::{BufRead, Write};

use voidsweep_core::{GameError, Position, RevealEngine, SessionState};

use crate::{prompt::Prompter, render::render};

/// Runs turns until the game is won or lost and returns the final state.
pub fn play<R: BufRead, W: Write, O: Write>(
    engine: &mut RevealEngine,
    prompter: &mut Prompter<R, W>,
    out: &mut O,
) -> anyhow::Result<SessionState> {
    write!(out, "{}", render(engine.field(), false))?;

    loop {
        writeln!(out)?;
        let row = prompter.read_int("Open row #:")?;
        let col = prompter.read_int("Open column #:")?;

        match Position::from_signed(row, col).and_then(|pos| engine.open(pos)) {
            Ok(outcome) if !outcome.has_update() => {
                writeln!(out, "Cell ({row}, {col}) is already open")?;
                continue;
            }
            Ok(outcome) => {
                log::debug!("Opened ({}, {}): {:?}", row, col, outcome);
            }
            Err(GameError::GameOver) => {
                writeln!(out)?;
                write!(out, "{}", render(engine.field(), true))?;
                writeln!(out, "Game is lost")?;
                return Ok(SessionState::Lost);
            }
            Err(err @ GameError::OutOfBounds { .. }) => {
                writeln!(out, "{err}")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        writeln!(out)?;
        write!(out, "{}", render(engine.field(), false))?;

        if engine.is_all_opened() {
            writeln!(out, "Game is won")?;
            return Ok(SessionState::Won);
        }
    }
}
