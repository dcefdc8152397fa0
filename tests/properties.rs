use std::collections::HashSet;

use proptest::prelude::*;
use torus::{pos, Boundary, CellView, Engine, Grid, Pos, OFFSETS};

fn bound_grid(width: usize, height: usize, states: &[u8]) -> Grid<u8> {
    let mut grid = Grid::new(width, height, Boundary::Wrap).unwrap();
    for ((_, cell), &state) in grid.iter_mut().zip(states) {
        cell.state = state;
    }
    grid.bind_neighbors().unwrap();
    grid
}

/// Mod-3 sum of the cell and its neighbors.
fn sum_rule(cell: CellView<'_, u8>) -> Option<u8> {
    let sum: u32 = cell.neighbors().map(u32::from).sum::<u32>() + u32::from(cell.state());
    Some((sum % 3) as u8)
}

fn dimensions() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (3usize..14, 3usize..14).prop_flat_map(|(width, height)| {
        (
            Just(width),
            Just(height),
            prop::collection::vec(0u8..3, width * height),
        )
    })
}

proptest! {
    #[test]
    fn neighbors_are_complete_and_symmetric(width in 3usize..16, height in 3usize..16) {
        let grid = bound_grid(width, height, &[]);
        for (pos, cell) in grid.iter() {
            let own = pos.index(width);
            let neighbors = cell.neighbor_indices().unwrap();
            let distinct: HashSet<_> = neighbors.iter().copied().collect();
            prop_assert_eq!(distinct.len(), 8);
            prop_assert!(!distinct.contains(&own));
            for &other in neighbors {
                let other = Pos::from_index(other, width);
                let back = grid.get(other.i, other.j).neighbor_indices().unwrap();
                prop_assert!(back.contains(&own));
            }
        }
    }

    #[test]
    fn neighbors_wrap_modulo_dimensions(width in 1usize..16, height in 1usize..16) {
        let grid = bound_grid(width, height, &[]);
        for (pos, cell) in grid.iter() {
            let neighbors = cell.neighbor_indices().unwrap();
            for (&index, (di, dj)) in neighbors.iter().zip(OFFSETS) {
                let expected = pos!(
                    (pos.i as isize + di + height as isize) as usize % height,
                    (pos.j as isize + dj + width as isize) as usize % width
                );
                prop_assert_eq!(Pos::from_index(index, width), expected);
            }
        }
        let corner = grid.get(0, 0).neighbor_indices().unwrap()[0];
        prop_assert_eq!(Pos::from_index(corner, width), pos!(height - 1, width - 1));
    }

    #[test]
    fn binding_twice_is_identical(width in 1usize..12, height in 1usize..12) {
        let mut grid = bound_grid(width, height, &[]);
        let first: Vec<_> = grid.iter().map(|(_, c)| *c.neighbor_indices().unwrap()).collect();
        grid.bind_neighbors().unwrap();
        let second: Vec<_> = grid.iter().map(|(_, c)| *c.neighbor_indices().unwrap()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn step_depends_only_on_previous_states((width, height, states) in dimensions()) {
        let mut grid = bound_grid(width, height, &states);
        let mut replay = grid.clone();

        Engine::new().step(&mut grid, &sum_rule).unwrap();
        Engine::new().step(&mut replay, &sum_rule).unwrap();
        prop_assert_eq!(grid.states(), replay.states());

        // every cell computed from the untouched pre-step snapshot
        for (pos, cell) in grid.iter() {
            let mut sum = u32::from(states[pos.index(width)]);
            for (di, dj) in OFFSETS {
                sum += u32::from(states[pos.offset(di, dj, width, height).index(width)]);
            }
            prop_assert_eq!(cell.state, (sum % 3) as u8);
        }
    }

    #[test]
    fn no_change_rule_never_notifies((width, height, states) in dimensions(), steps in 1usize..6) {
        let mut grid = bound_grid(width, height, &states);
        let before = grid.fingerprint();
        let mut engine = Engine::new();
        for _ in 0..steps {
            let changes = engine.step(&mut grid, &|_: CellView<'_, u8>| None).unwrap();
            prop_assert!(changes.is_empty());
        }
        prop_assert_eq!(grid.states(), states);
        prop_assert_eq!(grid.fingerprint(), before);
    }

    #[test]
    fn changes_are_exactly_the_differences((width, height, states) in dimensions()) {
        let mut grid = bound_grid(width, height, &states);
        let changes = Engine::new().step(&mut grid, &sum_rule).unwrap();
        let changed: HashSet<_> = changes.iter().map(|c| c.pos).collect();
        for (pos, cell) in grid.iter() {
            let was = states[pos.index(width)];
            prop_assert_eq!(changed.contains(&pos), cell.state != was);
        }
    }
}
