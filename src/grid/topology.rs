use crate::{
    pos,
    utils::{next, prev},
    Error, Pos, Result,
};

/// Number of cells in a Moore neighborhood.
pub const NEIGHBORHOOD: usize = 8;

/// `(di, dj)` of each neighbor, row-major: NW, N, NE, W, E, SW, S, SE.
pub const OFFSETS: [(isize, isize); NEIGHBORHOOD] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Positions of the N, W, E and S neighbors inside the Moore ordering.
pub const VON_NEUMANN: [usize; 4] = [1, 3, 4, 6];

/// What lies beyond the edges of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Boundary {
    /// left edge joins the right edge, top joins bottom.
    #[default]
    Wrap,
    /// cells past the edge read as the default state. Not implemented.
    Dead,
    /// edges mirror the cells next to them. Not implemented.
    Reflect,
}

/// Moore neighborhood of `pos` on a `width` x `height` grid.
pub fn moore_neighbors(
    pos: Pos,
    width: usize,
    height: usize,
    boundary: Boundary,
) -> Result<[Pos; NEIGHBORHOOD]> {
    match boundary {
        Boundary::Wrap => {
            let Pos { i, j } = pos;
            let (up, down) = (prev(i, height), next(i, height));
            let (left, right) = (prev(j, width), next(j, width));
            Ok([
                pos!(up, left),
                pos!(up, j),
                pos!(up, right),
                pos!(i, left),
                pos!(i, right),
                pos!(down, left),
                pos!(down, j),
                pos!(down, right),
            ])
        }
        other => Err(Error::UnsupportedBoundary(other)),
    }
}

#[test]
fn test_neighbors_match_offsets() {
    let (width, height) = (6, 4);
    for i in 0..height {
        for j in 0..width {
            let neighbors = moore_neighbors(pos!(i, j), width, height, Boundary::Wrap).unwrap();
            for (neighbor, (di, dj)) in neighbors.iter().zip(OFFSETS) {
                assert_eq!(*neighbor, pos!(i, j).offset(di, dj, width, height));
            }
        }
    }
}

#[test]
fn test_origin_wraps_to_far_corner() {
    let neighbors = moore_neighbors(pos!(0, 0), 10, 8, Boundary::Wrap).unwrap();
    assert_eq!(neighbors[0], pos!(7, 9));
    assert_eq!(neighbors[1], pos!(7, 0));
    assert_eq!(neighbors[3], pos!(0, 9));
}

#[test]
fn test_von_neumann_positions() {
    let neighbors = moore_neighbors(pos!(5, 5), 20, 20, Boundary::Wrap).unwrap();
    let cross: Vec<_> = VON_NEUMANN.iter().map(|&k| neighbors[k]).collect();
    assert_eq!(cross, vec![pos!(4, 5), pos!(5, 4), pos!(5, 6), pos!(6, 5)]);
}
