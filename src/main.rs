use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use torus::{
    rules::{life, modulo_prime},
    view::{Display, Headless, TerminalView},
    Automaton, Config, Pattern,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rule {
    Life,
    ModuloPrime,
}

impl Rule {
    /// grid size used when neither the command line nor a terminal picks one.
    fn default_grid(self) -> (usize, usize) {
        match self {
            Rule::Life => (150, 150),
            Rule::ModuloPrime => (250, 250),
        }
    }
}

/// Runs a cellular automaton on a toroidal grid in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// rule set to simulate
    #[arg(long, value_enum, default_value = "life")]
    rule: Rule,

    /// grid width in cells [default: terminal width]
    #[arg(long)]
    width: Option<usize>,

    /// grid height in cells [default: terminal height]
    #[arg(long)]
    height: Option<usize>,

    /// maximum generations per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// text pattern to start from, `#` for live cells
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// seed of the random starting configuration
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// start stepping immediately instead of waiting for a click
    #[arg(long)]
    running: bool,

    /// evaluate the rule on all cores
    #[arg(long)]
    parallel: bool,

    /// run this many generations without a terminal, then exit
    #[arg(long)]
    headless: Option<usize>,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level)
        .init()
        .context("installing logger")?;

    let pattern = match &args.pattern {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading pattern {}", path.display()))?;
            Some(Pattern::parse(&text))
        }
        None => None,
    };

    match args.headless {
        Some(frames) => {
            let (width, height) = grid_size(&args, args.rule.default_grid());
            let window = (u32::try_from(width)?, u32::try_from(height)?);
            let mut display = Headless::new(window).quit_after(frames);
            launch(&args, config(&args, width, height), pattern, &mut display)?;
            log::info!("stopped after {} frames", display.frames().len());
        }
        None => {
            let mut display = TerminalView::spawn().context("opening terminal")?;
            let (columns, rows) = display.window_size();
            let window = (usize::try_from(columns)?, usize::try_from(rows)?);
            let (width, height) = grid_size(&args, window);
            launch(&args, config(&args, width, height), pattern, &mut display)?;
        }
    }
    Ok(())
}

fn grid_size(args: &Args, (width, height): (usize, usize)) -> (usize, usize) {
    (args.width.unwrap_or(width), args.height.unwrap_or(height))
}

fn config(args: &Args, width: usize, height: usize) -> Config {
    Config {
        start_paused: !args.running && args.headless.is_none(),
        parallel: args.parallel,
        ..Config::default().with_grid(width, height).with_fps(args.fps)
    }
}

fn launch<D: Display>(
    args: &Args,
    config: Config,
    pattern: Option<Pattern>,
    display: &mut D,
) -> anyhow::Result<()> {
    let seed = args.seed;
    match args.rule {
        Rule::Life => {
            let mut automaton = Automaton::new(config, life::palette());
            match pattern {
                Some(pattern) => automaton
                    .set_initializer(move |grid| pattern.stamp(grid, life::LifeState::Alive)),
                None => automaton.set_initializer(life::random_center(seed)),
            };
            automaton.set_transition(life::transition);
            automaton.run(display)?;
        }
        Rule::ModuloPrime => {
            let mut automaton = Automaton::new(config, modulo_prime::palette());
            match pattern {
                Some(pattern) => automaton.set_initializer(move |grid| pattern.stamp(grid, 1)),
                None => automaton.set_initializer(modulo_prime::heart),
            };
            automaton.set_transition(modulo_prime::transition);
            automaton.run(display)?;
        }
    }
    Ok(())
}

#[test]
fn test_grid_size_defaults() {
    let args = Args::parse_from(["torus", "--rule", "modulo-prime", "--width", "40"]);
    assert_eq!(grid_size(&args, args.rule.default_grid()), (40, 250));
    assert_eq!(grid_size(&args, (80, 23)), (40, 23));

    let args = Args::parse_from(["torus", "--headless", "3"]);
    assert_eq!(grid_size(&args, args.rule.default_grid()), (150, 150));
    assert!(!config(&args, 150, 150).start_paused);
}
