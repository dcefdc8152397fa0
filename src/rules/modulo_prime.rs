//! Modulo-Prime: a cell is alive when an odd number of its von Neumann
//! neighbors are alive. Any starting shape is copied along both axes until
//! copies of it tile the whole torus.

use crate::{pos, CellView, Grid, Palette, Rgb, VON_NEUMANN};

pub fn transition(cell: CellView<'_, u8>) -> Option<u8> {
    let alive: u32 = VON_NEUMANN
        .iter()
        .map(|&k| u32::from(cell.neighbor(k)))
        .sum();
    Some((alive % 2) as u8)
}

pub fn palette() -> Palette<u8> {
    Palette::new()
        .with(0, Rgb::BLACK)
        .with(1, Rgb::from_unit(1.0, 0.0, 0.8))
}

/// `(di, dj)` offsets of the heart shape from the grid center.
const HEART: [(isize, isize); 26] = [
    (0, 0),
    (0, -1),
    (0, 1),
    (-1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (0, -2),
    (0, 2),
    (-2, 0),
    (1, -2),
    (2, -2),
    (1, -3),
    (1, -1),
    (1, 2),
    (2, 2),
    (1, 3),
    (1, 1),
    (0, -3),
    (-1, -2),
    (-2, -1),
    (0, 3),
    (-1, 2),
    (-2, 1),
    (-3, 0),
];

/// Draws a heart around the middle of the grid.
pub fn heart(grid: &mut Grid<u8>) {
    let (width, height) = grid.size();
    let center = pos!(height / 2, width / 2);
    for (di, dj) in HEART {
        grid.set(center.offset(di, dj, width, height), 1);
    }
}

#[test]
fn test_heart_cells() {
    let mut grid = Grid::new(20, 20, crate::Boundary::Wrap).unwrap();
    heart(&mut grid);
    let alive = grid.iter().filter(|(_, cell)| cell.state == 1).count();
    // two offsets appear twice
    assert_eq!(alive, 24);
    assert_eq!(grid.get(7, 10).state, 1);
    assert_eq!(grid.get(11, 13).state, 1);
}
