//! Plain-text patterns: `#` marks a live cell, a newline starts the next row
//! and any other character is a dead cell.

use crate::{pos, Grid, Pos, State};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    cells: Vec<Pos>,
}

impl Pattern {
    pub fn parse(text: &str) -> Self {
        let mut cells = vec![];
        let mut pos = pos!(0, 0);
        for c in text.chars() {
            match c {
                '#' => {
                    cells.push(pos);
                    pos.j += 1
                }
                '\n' => pos = pos!(pos.i + 1, 0),
                '\r' => (),
                _ => pos.j += 1,
            }
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// `(rows, columns)` of the smallest box holding every live cell,
    /// measured from the pattern origin.
    pub fn bounds(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(rows, columns), pos| {
            (rows.max(pos.i + 1), columns.max(pos.j + 1))
        })
    }

    /// Sets `state` on the pattern's cells, centered on the grid. Patterns
    /// larger than the grid wrap around.
    pub fn stamp<S: State>(&self, grid: &mut Grid<S>, state: S) {
        let (width, height) = grid.size();
        let (rows, columns) = self.bounds();
        let origin = pos!(height / 2, width / 2);
        let (top, left) = ((rows / 2) as isize, (columns / 2) as isize);
        for cell in &self.cells {
            let (di, dj) = (cell.i as isize - top, cell.j as isize - left);
            grid.set(origin.offset(di, dj, width, height), state);
        }
    }
}
