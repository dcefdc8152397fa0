use std::time::Duration;

use crate::{grid::cell_count, Boundary, ConfigError};

/// Settings of an automaton run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub grid_width: usize,
    pub grid_height: usize,
    pub boundary: Boundary,
    /// upper bound on generations per second.
    pub fps_max: u32,
    /// whether the scheduler waits for an input before the first tick.
    pub start_paused: bool,
    /// evaluate the rule on rayon's thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: 200,
            grid_height: 200,
            boundary: Boundary::Wrap,
            fps_max: 60,
            start_paused: true,
            parallel: false,
        }
    }
}

impl Config {
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_fps(mut self, fps_max: u32) -> Self {
        self.fps_max = fps_max;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if cell_count(self.grid_width, self.grid_height).is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.fps_max == 0 {
            return Err(ConfigError::InvalidFrameRate(self.fps_max));
        }
        Ok(())
    }

    /// shortest time between two ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps_max.max(1)
    }
}

#[test]
fn test_validate() {
    assert!(Config::default().validate().is_ok());
    assert_eq!(
        Config::default().with_grid(0, 10).validate(),
        Err(ConfigError::InvalidDimensions {
            width: 0,
            height: 10
        })
    );
    assert!(Config::default()
        .with_grid(usize::MAX, 3)
        .validate()
        .is_err());
    assert_eq!(
        Config::default().with_fps(0).validate(),
        Err(ConfigError::InvalidFrameRate(0))
    );
}

#[test]
fn test_frame_interval() {
    assert_eq!(
        Config::default().with_fps(50).frame_interval(),
        Duration::from_millis(20)
    );
}
