//! Presentation side of an automaton run.
//!
//! The automaton only talks to a [`Display`]: it binds a [`QuadLayout`] once,
//! pushes a color for every cell whose state changed, presents a frame per
//! scheduler tick and polls for user input.

use std::ops::Range;

use crate::{pos, Pos, Result, Rgb};

pub use canvas::Canvas;
mod canvas;

pub use headless::Headless;
mod headless;

pub use terminal::TerminalView;
mod terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    TogglePause,
    Quit,
}

/// Information shown alongside a presented frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub generation: u64,
    pub paused: bool,
    pub fps: f32,
}

pub trait Display {
    /// drawable area, in the display's own units (pixels, terminal cells).
    fn window_size(&self) -> (u32, u32);
    fn bind(&mut self, layout: QuadLayout) -> Result<()>;
    fn set_color(&mut self, pos: Pos, color: Rgb);
    fn present(&mut self, status: &Status) -> Result<()>;
    fn poll_input(&mut self) -> Option<Input>;
}

/// Corners of the rectangle drawn for one cell, in the order
/// `(x0, y0) (x0, y1) (x1, y0) (x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad(pub [(f32, f32); 4]);

/// Mapping from grid cells to window-space quads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadLayout {
    grid_width: usize,
    grid_height: usize,
    window_width: u32,
    window_height: u32,
    cell_width: f32,
    cell_height: f32,
}

impl QuadLayout {
    pub fn new(grid_width: usize, grid_height: usize, (window_width, window_height): (u32, u32)) -> Self {
        Self {
            grid_width,
            grid_height,
            window_width,
            window_height,
            cell_width: window_width as f32 / grid_width as f32,
            cell_height: window_height as f32 / grid_height as f32,
        }
    }

    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// `(cell_width, cell_height)`
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    pub fn quad(&self, Pos { i, j }: Pos) -> Quad {
        let x = |j: usize| edge(j, self.window_width, self.grid_width);
        let y = |i: usize| edge(i, self.window_height, self.grid_height);
        let (x0, y0, x1, y1) = (x(j), y(i), x(j + 1), y(i + 1));
        Quad([(x0, y0), (x0, y1), (x1, y0), (x1, y1)])
    }

    pub fn quads(&self) -> impl Iterator<Item = (Pos, Quad)> + '_ {
        (0..self.grid_height)
            .flat_map(move |i| (0..self.grid_width).map(move |j| pos!(i, j)))
            .map(move |pos| (pos, self.quad(pos)))
    }

    /// Whole window units covered by the quad of `pos`, as `(columns, rows)`.
    /// Neighboring cells never overlap; cells smaller than a unit may cover
    /// nothing.
    pub fn covered(&self, pos: Pos) -> (Range<u32>, Range<u32>) {
        let Quad([(x0, y0), .., (x1, y1)]) = self.quad(pos);
        let snap = |v: f32, max: u32| (v.floor() as u32).min(max);
        (
            snap(x0, self.window_width)..snap(x1, self.window_width),
            snap(y0, self.window_height)..snap(y1, self.window_height),
        )
    }
}

/// `n * cell_size`, multiplied first so the last edge lands on the window
/// border exactly.
fn edge(n: usize, window: u32, grid: usize) -> f32 {
    (n as f64 * f64::from(window) / grid as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners() {
        let layout = QuadLayout::new(150, 150, (600, 600));
        assert_eq!(layout.cell_size(), (4.0, 4.0));
        assert_eq!(
            layout.quad(pos!(2, 3)),
            Quad([(12.0, 8.0), (12.0, 12.0), (16.0, 8.0), (16.0, 12.0)])
        );
    }

    #[test]
    fn quads_are_row_major() {
        let layout = QuadLayout::new(3, 2, (30, 20));
        let positions: Vec<_> = layout.quads().map(|(pos, _)| pos).collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[1], pos!(0, 1));
        assert_eq!(positions[3], pos!(1, 0));
    }

    #[test]
    fn covered_spans_partition_the_window() {
        let layout = QuadLayout::new(3, 4, (10, 9));
        let mut columns = 0;
        for j in 0..3 {
            let (xs, _) = layout.covered(pos!(0, j));
            columns += xs.len();
        }
        assert_eq!(columns, 10);
        let (_, last_rows) = layout.covered(pos!(3, 0));
        assert_eq!(last_rows.end, 9);
    }
}
