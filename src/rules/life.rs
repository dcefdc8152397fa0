//! Conway's Game of Life: a dead cell with exactly three live neighbors is
//! born, a live cell with two or three live neighbors survives, everything
//! else dies.

use super::Lcg;
use crate::{CellView, Grid, Palette, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum LifeState {
    #[default]
    Dead,
    Alive,
}

pub fn transition(cell: CellView<'_, LifeState>) -> Option<LifeState> {
    let alive = cell.count(LifeState::Alive);
    match (cell.state(), alive) {
        (_, 3) | (LifeState::Alive, 2) => Some(LifeState::Alive),
        _ => Some(LifeState::Dead),
    }
}

pub fn palette() -> Palette<LifeState> {
    Palette::new()
        .with(LifeState::Dead, Rgb::BLACK)
        .with(LifeState::Alive, Rgb::WHITE)
}

/// Fills the middle square of the grid, `(1/4, 3/4]` along each axis, with
/// random cells. Everything else stays dead.
pub fn random_center(seed: u64) -> impl FnOnce(&mut Grid<LifeState>) {
    move |grid| {
        let mut rng = Lcg::new(seed);
        let (width, height) = grid.size();
        for (pos, cell) in grid.iter_mut() {
            let in_width = 4 * pos.j > width && 4 * pos.j <= 3 * width;
            let in_height = 4 * pos.i > height && 4 * pos.i <= 3 * height;
            cell.state = if in_width && in_height && rng.coin() {
                LifeState::Alive
            } else {
                LifeState::Dead
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Boundary;

    #[test]
    fn random_center_leaves_border_dead() {
        let mut grid = Grid::new(20, 12, Boundary::Wrap).unwrap();
        random_center(7)(&mut grid);
        for (pos, cell) in grid.iter() {
            let inside = pos.j > 5 && pos.j <= 15 && pos.i > 3 && pos.i <= 9;
            if !inside {
                assert_eq!(cell.state, LifeState::Dead, "{pos}");
            }
        }
        assert!(grid.iter().any(|(_, cell)| cell.state == LifeState::Alive));
    }
}
