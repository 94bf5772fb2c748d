mod app;
mod term;

use std::{fs::File, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::WriteLogger;

use two_snakes::config::{AppConfig, GameConfig, Resolution, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_MS};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser, Debug)]
#[command(name = "two_snakes")]
#[command(version, about = "Two-player snake in the terminal")]
struct Cli {
    /// Grid height, walls included
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Grid width, walls included
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Seed for food placement, for repeatable rounds
    #[arg(long)]
    seed: Option<u64>,

    /// How both snakes are resolved within a tick
    #[arg(long, value_enum, default_value = "simultaneous")]
    order: Resolution,

    /// Write logs to this file. The terminal is taken by the game, so
    /// without it nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        let mut game = GameConfig::new(self.rows, self.cols).with_resolution(self.order);
        game.seed = self.seed;
        AppConfig { game, tick_interval: Duration::from_millis(self.tick_ms) }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, simplelog::Config::default(), file)
            .context("Failed to initialize logger")?;
    }
    log::info!("Starting two_snakes with {:?}", cli);

    let mut game = app::TwoSnakes::new(cli.app_config())?;
    game.initialize()?;

    // Whatever happens during play, the terminal goes back to normal first
    let res = game.run();
    game.restore()?;
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["two_snakes"]).unwrap();
        let config = cli.app_config();

        assert_eq!((config.game.rows, config.game.cols), (20, 70));
        assert_eq!(config.game.resolution, Resolution::Simultaneous);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::try_parse_from([
            "two_snakes", "--rows", "12", "--cols", "30", "--tick-ms", "50",
            "--seed", "9", "--order", "sequential", "--log-level", "debug",
        ])
        .unwrap();
        let config = cli.app_config();

        assert_eq!((config.game.rows, config.game.cols), (12, 30));
        assert_eq!(config.game.resolution, Resolution::Sequential);
        assert_eq!(config.game.seed, Some(9));
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }
}
