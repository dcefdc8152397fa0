//! Error types shared by the grid, the engine and the automaton façade.

use thiserror::Error;

use crate::{Boundary, Pos};

/// Result type returned by fallible routines of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Misconfiguration detected before any generation runs.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("no grid initializer hook was set")]
    MissingInitializer,
    #[error("no transition hook was set")]
    MissingTransition,
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("frame rate cap must be positive, got {0}")]
    InvalidFrameRate(u32),
    #[error("state {0} has no color mapping")]
    UnmappedState(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported boundary rule: {0:?}")]
    UnsupportedBoundary(Boundary),
    #[error("cell {pos} is out of range for a {width}x{height} grid")]
    IndexOutOfRange {
        pos: Pos,
        width: usize,
        height: usize,
    },
    #[error("neighbors must be bound before rules are evaluated")]
    Unbound,
    #[error("display error: {0}")]
    Io(#[from] std::io::Error),
}
