//! Synchronous 2D cellular automata on a toroidal grid.
//!
//! A [`Grid`] stores the cells and their precomputed Moore neighborhoods, an
//! [`Engine`] advances it one generation at a time, and an [`Automaton`] wires
//! both to user hooks, a [`Palette`] and a [`view::Display`].

pub use utils::Pos;
pub mod utils;

pub use error::{ConfigError, Error, Result};
mod error;

pub use grid::{
    moore_neighbors, Boundary, Cell, CellView, Grid, State, NEIGHBORHOOD, OFFSETS, VON_NEUMANN,
};
mod grid;

pub use engine::{Change, Engine};
mod engine;

pub use palette::{Palette, Rgb};
mod palette;

pub use config::Config;
mod config;

pub use automaton::{Automaton, Initializer, Running, Transition};
mod automaton;

pub use sim::Scheduler;
mod sim;

pub use pattern::Pattern;
mod pattern;

pub mod rules;
pub mod view;
