use std::collections::HashMap;

use metrohash::MetroBuildHasher;

use crate::{ConfigError, Grid, State};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// builds a color from channels in `0.0..=1.0`, clamping anything outside.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(channel(r), channel(g), channel(b))
    }
}

/// Total mapping from cell states to display colors.
#[derive(Debug, Clone)]
pub struct Palette<S> {
    colors: HashMap<S, Rgb, MetroBuildHasher>,
}

impl<S> Default for Palette<S> {
    fn default() -> Self {
        Self {
            colors: HashMap::default(),
        }
    }
}

impl<S> Palette<S>
where
    S: State,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, state: S, color: Rgb) -> Self {
        self.insert(state, color);
        self
    }

    pub fn insert(&mut self, state: S, color: Rgb) {
        self.colors.insert(state, color);
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, state: S) -> Result<Rgb, ConfigError> {
        self.colors
            .get(&state)
            .copied()
            .ok_or_else(|| ConfigError::UnmappedState(format!("{state:?}")))
    }

    /// Checks that every state present on `grid` has a color.
    pub fn check_grid(&self, grid: &Grid<S>) -> Result<(), ConfigError> {
        grid.iter()
            .try_for_each(|(_, cell)| self.color(cell.state).map(drop))
    }
}

impl<S> FromIterator<(S, Rgb)> for Palette<S>
where
    S: State,
{
    fn from_iter<I: IntoIterator<Item = (S, Rgb)>>(iter: I) -> Self {
        let mut palette = Self::new();
        for (state, color) in iter {
            palette.insert(state, color);
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pos, Boundary};

    #[test]
    fn unit_channels() {
        assert_eq!(Rgb::from_unit(1.0, 0.0, 0.8), Rgb(255, 0, 204));
        assert_eq!(Rgb::from_unit(2.0, -1.0, 0.5), Rgb(255, 0, 128));
    }

    #[test]
    fn unmapped_state_is_a_config_error() {
        let palette = Palette::new().with(0u8, Rgb::BLACK).with(1, Rgb::WHITE);
        assert_eq!(palette.color(1), Ok(Rgb::WHITE));
        assert_eq!(
            palette.color(2),
            Err(ConfigError::UnmappedState("2".to_string()))
        );
    }

    #[test]
    fn grid_check() {
        let palette: Palette<u8> = [(0, Rgb::BLACK), (1, Rgb::WHITE)].into_iter().collect();
        let mut grid = Grid::new(3, 3, Boundary::Wrap).unwrap();
        grid.set(pos!(1, 1), 1);
        assert!(palette.check_grid(&grid).is_ok());
        grid.set(pos!(2, 2), 5);
        assert!(palette.check_grid(&grid).is_err());
    }
}
