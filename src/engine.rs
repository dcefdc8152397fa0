//! Synchronous generation update.
//!
//! A step scans every cell against the previous generation, buffers the
//! states that differ, and only then commits them. No cell ever observes a
//! neighbor that was already updated in the same generation.

use log::trace;
use rayon::prelude::*;

use crate::{CellView, Error, Grid, Pos, Result, State};

/// Committed state change of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change<S> {
    pub pos: Pos,
    pub state: S,
}

#[derive(Debug, Clone)]
pub struct Engine<S> {
    pending: Vec<(usize, S)>,
    generation: u64,
}

impl<S> Default for Engine<S> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            generation: 0,
        }
    }
}

/// Next state of a cell, `None` meaning "keep the current state".
fn evaluate<S, R>(view: CellView<'_, S>, rule: &R) -> Option<S>
where
    S: State,
    R: Fn(CellView<'_, S>) -> Option<S> + ?Sized,
{
    let current = view.state();
    rule(view).filter(|&next| next != current)
}

impl<S> Engine<S>
where
    S: State,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// number of generations stepped so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances `grid` by one generation and returns the changes committed.
    pub fn step<R>(&mut self, grid: &mut Grid<S>, rule: &R) -> Result<Vec<Change<S>>>
    where
        R: Fn(CellView<'_, S>) -> Option<S> + ?Sized,
    {
        self.step_checked(grid, rule, |_| Ok(()))
    }

    /// Like [`Engine::step`], but every pending state goes through `check`
    /// before anything is committed. If one is rejected the grid is left as
    /// it was and the generation does not advance.
    pub fn step_checked<R, C>(
        &mut self,
        grid: &mut Grid<S>,
        rule: &R,
        check: C,
    ) -> Result<Vec<Change<S>>>
    where
        R: Fn(CellView<'_, S>) -> Option<S> + ?Sized,
        C: FnMut(S) -> Result<()>,
    {
        if !grid.is_bound() {
            return Err(Error::Unbound);
        }
        self.pending.clear();
        for index in 0..grid.len() {
            if let Some(next) = evaluate(grid.view(index)?, rule) {
                self.pending.push((index, next));
            }
        }
        self.finish(grid, check)
    }

    /// Same as [`Engine::step`], with the scan spread over rayon's pool. Each
    /// worker fills its own partition of the pending buffer; the commit waits
    /// for all of them.
    pub fn step_parallel<R>(&mut self, grid: &mut Grid<S>, rule: &R) -> Result<Vec<Change<S>>>
    where
        R: Fn(CellView<'_, S>) -> Option<S> + Sync + ?Sized,
    {
        self.step_parallel_checked(grid, rule, |_| Ok(()))
    }

    pub fn step_parallel_checked<R, C>(
        &mut self,
        grid: &mut Grid<S>,
        rule: &R,
        check: C,
    ) -> Result<Vec<Change<S>>>
    where
        R: Fn(CellView<'_, S>) -> Option<S> + Sync + ?Sized,
        C: FnMut(S) -> Result<()>,
    {
        if !grid.is_bound() {
            return Err(Error::Unbound);
        }
        let snapshot: &Grid<S> = grid;
        let pending = (0..snapshot.len())
            .into_par_iter()
            .map(|index| snapshot.view(index).map(|view| (index, evaluate(view, rule))))
            .filter_map(|result| match result {
                Ok((index, Some(next))) => Some(Ok((index, next))),
                Ok((_, None)) => None,
                Err(err) => Some(Err(err)),
            })
            .collect::<Result<Vec<_>>>()?;
        self.pending = pending;
        self.finish(grid, check)
    }

    fn finish<C>(&mut self, grid: &mut Grid<S>, mut check: C) -> Result<Vec<Change<S>>>
    where
        C: FnMut(S) -> Result<()>,
    {
        if let Err(err) = self.pending.iter().try_for_each(|&(_, state)| check(state)) {
            self.pending.clear();
            return Err(err);
        }
        Ok(self.commit(grid))
    }

    fn commit(&mut self, grid: &mut Grid<S>) -> Vec<Change<S>> {
        let width = grid.width();
        let changes: Vec<_> = self
            .pending
            .drain(..)
            .map(|(index, state)| {
                grid.commit(index, state);
                Change {
                    pos: Pos::from_index(index, width),
                    state,
                }
            })
            .collect();
        self.generation += 1;
        trace!(
            "generation {} committed {} changes",
            self.generation,
            changes.len()
        );
        changes
    }
}
