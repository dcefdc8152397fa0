//! The automaton façade: a grid, an engine, two user hooks and a palette.

use std::collections::VecDeque;

use log::{debug, info};

use crate::{
    sim::Scheduler,
    view::{Display, QuadLayout},
    CellView, Change, Config, ConfigError, Engine, Grid, Palette, Result, State,
};

/// Applies the starting configuration. Runs once, before neighbors are bound.
pub type Initializer<S> = Box<dyn FnOnce(&mut Grid<S>)>;

/// Next state of one cell given read-only access to it and its neighbors.
/// `None` and `Some(current)` both mean "unchanged" and produce no
/// notification.
pub type Transition<S> = Box<dyn Fn(CellView<'_, S>) -> Option<S> + Send + Sync>;

pub struct Automaton<S> {
    config: Config,
    palette: Palette<S>,
    initializer: Option<Initializer<S>>,
    transition: Option<Transition<S>>,
}

impl<S> Automaton<S>
where
    S: State,
{
    pub fn new(config: Config, palette: Palette<S>) -> Self {
        Self {
            config,
            palette,
            initializer: None,
            transition: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_initializer(&mut self, hook: impl FnOnce(&mut Grid<S>) + 'static) -> &mut Self {
        self.initializer = Some(Box::new(hook));
        self
    }

    pub fn set_transition(
        &mut self,
        hook: impl Fn(CellView<'_, S>) -> Option<S> + Send + Sync + 'static,
    ) -> &mut Self {
        self.transition = Some(Box::new(hook));
        self
    }

    /// Validates the setup, builds and initializes the grid, then binds
    /// neighbors. Nothing is stepped yet.
    pub fn prepare(self) -> Result<Running<S>> {
        self.config.validate()?;
        let initializer = self.initializer.ok_or(ConfigError::MissingInitializer)?;
        let transition = self.transition.ok_or(ConfigError::MissingTransition)?;

        let mut grid = Grid::new(
            self.config.grid_width,
            self.config.grid_height,
            self.config.boundary,
        )?;
        initializer(&mut grid);
        grid.bind_neighbors()?;
        self.palette.check_grid(&grid)?;
        info!(
            "prepared {}x{} grid with {} mapped states",
            grid.width(),
            grid.height(),
            self.palette.len()
        );

        let history = VecDeque::from([grid.fingerprint()]);
        Ok(Running {
            grid,
            engine: Engine::new(),
            transition,
            palette: self.palette,
            parallel: self.config.parallel,
            history,
            repeated_at: None,
        })
    }

    /// Prepares the automaton, paints the initial grid on `display` and
    /// ticks until the display asks to quit.
    pub fn run<D>(self, display: &mut D) -> Result<()>
    where
        D: Display,
    {
        let config = self.config;
        let mut running = self.prepare()?;
        running.attach(display)?;
        info!("running at up to {} generations per second", config.fps_max);
        Scheduler::new(config.frame_interval(), config.start_paused)
            .run(display, |display| running.tick(display))
    }
}

/// Number of recent configurations remembered to spot a repeat.
const HISTORY: usize = 10;

/// A prepared automaton, ready to step.
pub struct Running<S> {
    grid: Grid<S>,
    engine: Engine<S>,
    transition: Transition<S>,
    palette: Palette<S>,
    parallel: bool,
    history: VecDeque<u64>,
    repeated_at: Option<u64>,
}

impl<S> Running<S>
where
    S: State,
{
    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    /// Binds the cell layout to `display` and paints every cell.
    pub fn attach<D: Display>(&self, display: &mut D) -> Result<()> {
        let (width, height) = self.grid.size();
        display.bind(QuadLayout::new(width, height, display.window_size()))?;
        for (pos, cell) in self.grid.iter() {
            display.set_color(pos, self.palette.color(cell.state)?);
        }
        debug!("painted {} cells", self.grid.len());
        Ok(())
    }

    /// First generation whose configuration matched one of the previous
    /// few generations, if any.
    pub fn repeated_at(&self) -> Option<u64> {
        self.repeated_at
    }

    /// Advances one generation without notifying any display. A state
    /// missing from the palette fails the step before anything is committed.
    pub fn step(&mut self) -> Result<Vec<Change<S>>> {
        let palette = &self.palette;
        let check = |state: S| -> Result<()> {
            palette.color(state)?;
            Ok(())
        };
        let changes = if self.parallel {
            self.engine
                .step_parallel_checked(&mut self.grid, &*self.transition, check)?
        } else {
            self.engine
                .step_checked(&mut self.grid, &*self.transition, check)?
        };
        self.remember();
        Ok(changes)
    }

    fn remember(&mut self) {
        let fingerprint = self.grid.fingerprint();
        if self.repeated_at.is_none() && self.history.contains(&fingerprint) {
            let generation = self.generation();
            info!("configuration repeats at generation {generation}");
            self.repeated_at = Some(generation);
        }
        if self.history.len() == HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
    }

    /// Advances one generation and recolors the cells that changed. Returns
    /// the new generation count.
    pub fn tick<D: Display>(&mut self, display: &mut D) -> Result<u64> {
        let colors = self
            .step()?
            .into_iter()
            .map(|change| Ok((change.pos, self.palette.color(change.state)?)))
            .collect::<Result<Vec<_>>>()?;
        for (pos, color) in colors {
            display.set_color(pos, color);
        }
        Ok(self.generation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pos, view::Headless, Boundary, Error, Rgb};

    fn palette() -> Palette<u8> {
        Palette::new().with(0, Rgb::BLACK).with(1, Rgb::WHITE)
    }

    fn config() -> Config {
        Config::default().with_grid(4, 4).with_fps(1000)
    }

    #[test]
    fn hooks_are_required() {
        let automaton = Automaton::new(config(), palette());
        assert!(matches!(
            automaton.prepare(),
            Err(Error::Config(ConfigError::MissingInitializer))
        ));

        let mut automaton = Automaton::new(config(), palette());
        automaton.set_initializer(|_| {});
        assert!(matches!(
            automaton.prepare(),
            Err(Error::Config(ConfigError::MissingTransition))
        ));
    }

    #[test]
    fn invalid_config_fails_before_hooks_run() {
        let mut automaton = Automaton::new(config().with_grid(0, 4), palette());
        automaton
            .set_initializer(|_| panic!("initializer must not run"))
            .set_transition(|_| None);
        assert!(matches!(
            automaton.prepare(),
            Err(Error::Config(ConfigError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn unmapped_initial_state_is_rejected() {
        let mut automaton = Automaton::new(config(), palette());
        automaton
            .set_initializer(|grid| grid.set(pos!(1, 1), 9))
            .set_transition(|_| None);
        assert!(matches!(
            automaton.prepare(),
            Err(Error::Config(ConfigError::UnmappedState(_)))
        ));
    }

    #[test]
    fn prepare_initializes_then_binds() {
        let mut automaton = Automaton::new(config(), palette());
        automaton
            .set_initializer(|grid| {
                assert!(!grid.is_bound());
                grid.set(pos!(2, 3), 1);
            })
            .set_transition(|_| None);
        let running = automaton.prepare().unwrap();
        assert!(running.grid().is_bound());
        assert_eq!(running.grid().get(2, 3).state, 1);
        assert_eq!(running.generation(), 0);
    }

    #[test]
    fn tick_notifies_only_changes() {
        let mut automaton = Automaton::new(config(), palette());
        automaton
            .set_initializer(|grid| grid.set(pos!(0, 0), 1))
            .set_transition(|cell| (cell.pos() == pos!(0, 1)).then(|| 1));
        let mut running = automaton.prepare().unwrap();
        let mut display = Headless::new((40, 40));
        running.attach(&mut display).unwrap();
        assert_eq!(display.updates().len(), 16);
        display.clear_updates();

        assert_eq!(running.tick(&mut display).unwrap(), 1);
        assert_eq!(display.updates(), &[(pos!(0, 1), Rgb::WHITE)]);
        display.clear_updates();

        running.tick(&mut display).unwrap();
        assert!(display.updates().is_empty());
    }

    #[test]
    fn unmapped_emitted_state_is_an_error() {
        let mut automaton = Automaton::new(config(), palette());
        automaton
            .set_initializer(|_| {})
            .set_transition(|_| Some(7));
        let mut running = automaton.prepare().unwrap();
        let mut display = Headless::new((4, 4));
        assert!(running.tick(&mut display).is_err());
    }

    #[test]
    fn failed_tick_leaves_grid_and_display_untouched() {
        let mut automaton = Automaton::new(config(), palette());
        automaton.set_initializer(|_| {}).set_transition(|cell| {
            match (cell.pos().i, cell.pos().j) {
                (0, 0) => Some(1),
                (3, 3) => Some(9),
                _ => None,
            }
        });
        let mut running = automaton.prepare().unwrap();
        let mut display = Headless::new((4, 4));
        running.attach(&mut display).unwrap();
        display.clear_updates();
        let before = running.grid().states();

        assert!(matches!(
            running.tick(&mut display),
            Err(Error::Config(ConfigError::UnmappedState(state))) if state == "9"
        ));
        assert!(display.updates().is_empty());
        assert_eq!(running.grid().states(), before);
        assert_eq!(running.generation(), 0);
    }

    #[test]
    fn unsupported_boundary_fails_before_painting() {
        let dead_edges = Config {
            boundary: Boundary::Dead,
            ..config()
        };
        let build = || {
            let mut automaton = Automaton::new(dead_edges, palette());
            automaton.set_initializer(|_| {}).set_transition(|_| Some(1));
            automaton
        };
        assert!(matches!(
            build().prepare(),
            Err(Error::UnsupportedBoundary(Boundary::Dead))
        ));

        let mut display = Headless::new((4, 4)).quit_after(1);
        assert!(matches!(
            build().run(&mut display),
            Err(Error::UnsupportedBoundary(Boundary::Dead))
        ));
        assert!(display.layout().is_none());
        assert!(display.updates().is_empty());
        assert!(display.frames().is_empty());
    }

    #[test]
    fn repeated_configuration_is_detected() {
        let mut automaton = Automaton::new(config().with_grid(6, 6), palette());
        automaton
            .set_initializer(|grid| {
                for j in 1..=3 {
                    grid.set(pos!(2, j), 1);
                }
            })
            .set_transition(|cell| {
                let alive = cell.count(1);
                Some(u8::from(alive == 3 || (alive == 2 && cell.state() == 1)))
            });
        let mut running = automaton.prepare().unwrap();

        running.step().unwrap();
        assert_eq!(running.repeated_at(), None);
        running.step().unwrap();
        assert_eq!(running.repeated_at(), Some(2));
        running.step().unwrap();
        assert_eq!(running.repeated_at(), Some(2));
    }
}
