//! Dense toroidal storage for the cells of an automaton.
//!
//! Cells live in a flat row-major arena owned by the [`Grid`]. Each cell
//! carries the linear indices of its eight Moore neighbors once
//! [`Grid::bind_neighbors`] ran, so rules can read neighbor states without any
//! cell owning another.

use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
    mem::size_of,
};

use itertools::iproduct;
use log::debug;
use metrohash::MetroHash64;

use crate::{pos, ConfigError, Error, Pos, Result};

pub use topology::{moore_neighbors, Boundary, NEIGHBORHOOD, OFFSETS, VON_NEUMANN};
mod topology;

/// Value held by a cell. Anything small, comparable and hashable works, from a
/// plain `u8` to a dedicated enum.
pub trait State: Copy + Eq + Hash + Default + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Copy + Eq + Hash + Default + Debug + Send + Sync + 'static {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell<S> {
    pub state: S,
    neighbors: Option<[usize; NEIGHBORHOOD]>,
}

impl<S> Cell<S>
where
    S: State,
{
    pub fn new(state: S) -> Self {
        Self {
            state,
            neighbors: None,
        }
    }

    /// linear indices of the neighbors, `None` until the grid binds them.
    pub fn neighbor_indices(&self) -> Option<&[usize; NEIGHBORHOOD]> {
        self.neighbors.as_ref()
    }
}

/// `width * height`, or `None` when either side is zero or the product
/// overflows.
pub fn cell_count(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(height)
        .filter(|&len| len > 0 && len <= isize::MAX as usize)
}

#[derive(Debug, Clone)]
pub struct Grid<S> {
    width: usize,
    height: usize,
    boundary: Boundary,
    cells: Vec<Cell<S>>,
}

impl<S> Grid<S>
where
    S: State,
{
    pub fn new(width: usize, height: usize, boundary: Boundary) -> Result<Self> {
        let fits = |len: &usize| {
            len.checked_mul(size_of::<Cell<S>>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        };
        let len = cell_count(width, height)
            .filter(fits)
            .ok_or(ConfigError::InvalidDimensions { width, height })?;
        let cells = vec![Cell::default(); len];
        Ok(Self {
            width,
            height,
            boundary,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn contains(&self, pos: Pos) -> bool {
        pos.i < self.height && pos.j < self.width
    }

    pub fn try_get(&self, pos: Pos) -> Result<&Cell<S>> {
        if !self.contains(pos) {
            return Err(self.out_of_range(pos));
        }
        Ok(&self.cells[pos.index(self.width)])
    }

    pub fn try_get_mut(&mut self, pos: Pos) -> Result<&mut Cell<S>> {
        if !self.contains(pos) {
            return Err(self.out_of_range(pos));
        }
        let index = pos.index(self.width);
        Ok(&mut self.cells[index])
    }

    fn out_of_range(&self, pos: Pos) -> Error {
        Error::IndexOutOfRange {
            pos,
            width: self.width,
            height: self.height,
        }
    }

    /// Cell at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics when the coordinates fall outside the grid.
    pub fn get(&self, i: usize, j: usize) -> &Cell<S> {
        match self.try_get(pos!(i, j)) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable cell at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics when the coordinates fall outside the grid.
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut Cell<S> {
        match self.try_get_mut(pos!(i, j)) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn set(&mut self, pos: Pos, state: S) {
        self.get_mut(pos.i, pos.j).state = state;
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell<S>)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Pos::from_index(index, width), cell))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Pos, &mut Cell<S>)> + '_ {
        let width = self.width;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(index, cell)| (Pos::from_index(index, width), cell))
    }

    /// Computes the Moore neighborhood of every cell under the boundary rule
    /// and stores it in the cells. Rebinding derives the same indices again.
    pub fn bind_neighbors(&mut self) -> Result<()> {
        let (width, height, boundary) = (self.width, self.height, self.boundary);
        for (i, j) in iproduct!(0..height, 0..width) {
            let neighbors = moore_neighbors(pos!(i, j), width, height, boundary)?;
            let indices = neighbors.map(|pos| pos.index(width));
            self.cells[pos!(i, j).index(width)].neighbors = Some(indices);
        }
        debug!("bound neighbors of {width}x{height} grid ({boundary:?})");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.cells.iter().all(|cell| cell.neighbors.is_some())
    }

    /// Read-only view of the cell at linear `index`, as handed to transition
    /// rules.
    pub(crate) fn view(&self, index: usize) -> Result<CellView<'_, S>> {
        let neighbors = self.cells[index].neighbors.as_ref().ok_or(Error::Unbound)?;
        Ok(CellView {
            grid: self,
            index,
            neighbors,
        })
    }

    pub fn view_at(&self, pos: Pos) -> Result<CellView<'_, S>> {
        if !self.contains(pos) {
            return Err(self.out_of_range(pos));
        }
        self.view(pos.index(self.width))
    }

    pub(crate) fn state_at(&self, index: usize) -> S {
        self.cells[index].state
    }

    pub(crate) fn commit(&mut self, index: usize, state: S) {
        self.cells[index].state = state;
    }

    /// snapshot of the state vector, row-major.
    pub fn states(&self) -> Vec<S> {
        self.cells.iter().map(|cell| cell.state).collect()
    }

    /// Digest of the dimensions and state vector.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        self.size().hash(&mut hasher);
        for cell in &self.cells {
            cell.state.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Read-only handle on one cell and its neighborhood during a generation.
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a, S> {
    grid: &'a Grid<S>,
    index: usize,
    neighbors: &'a [usize; NEIGHBORHOOD],
}

impl<'a, S> CellView<'a, S>
where
    S: State,
{
    pub fn state(&self) -> S {
        self.grid.state_at(self.index)
    }

    pub fn pos(&self) -> Pos {
        Pos::from_index(self.index, self.grid.width)
    }

    /// State of the neighbor at position `k` of the Moore ordering
    /// (NW, N, NE, W, E, SW, S, SE).
    pub fn neighbor(&self, k: usize) -> S {
        self.grid.state_at(self.neighbors[k])
    }

    pub fn neighbors(&self) -> impl Iterator<Item = S> + 'a {
        let grid = self.grid;
        self.neighbors.iter().map(move |&index| grid.state_at(index))
    }

    pub fn count(&self, state: S) -> usize {
        self.neighbors().filter(|&s| s == state).count()
    }
}
