use std::fmt;

use voidsweep_core::{Cell, Field};

const CLOSED: char = '?';
const HAZARD: char = 'X';

fn glyph(cell: &Cell, reveal_hazards: bool) -> char {
    if cell.is_hazard() && (cell.is_opened() || reveal_hazards) {
        HAZARD
    } else if cell.is_opened() {
        // at most 8 hazards surround a safe cell
        char::from(b'0' + cell.adjacent_hazard_count())
    } else {
        CLOSED
    }
}

/// Text view of a field: a header of column indices, then one line per row.
///
/// Closed cells show `?`, open cells their adjacency count. With `reveal_hazards` every hazard is
/// drawn as `X`, used once the game is lost.
#[derive(Debug)]
pub struct FieldView<'a> {
    field: &'a Field,
    reveal_hazards: bool,
}

pub fn render(field: &Field, reveal_hazards: bool) -> FieldView<'_> {
    FieldView {
        field,
        reveal_hazards,
    }
}

impl fmt::Display for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_width = self.field.width().saturating_sub(1).to_string().len();
        let row_width = self.field.height().saturating_sub(1).to_string().len();

        write!(f, "{:row_width$}  ", "")?;
        for col in 0..self.field.width() {
            write!(f, " {col:>col_width$}")?;
        }
        writeln!(f)?;

        for (row, cells) in self.field.rows().enumerate() {
            write!(f, "{row:>row_width$}  ")?;
            for cell in cells.iter() {
                write!(f, " {:>col_width$}", glyph(cell, self.reveal_hazards))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
