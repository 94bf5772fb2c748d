use std::time::Duration;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 70;
pub const MIN_GRID_SIDE: usize = 5;
pub const DEFAULT_TICK_MS: u64 = 100;

/// How the two snakes are resolved within one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Resolution {
    /// Both snakes are judged against the board as it was when the tick
    /// started, then both are moved.
    Simultaneous,
    /// Player one is judged and moved first; player two then sees the
    /// board with player one's move already applied.
    Sequential,
}

/// Settings for a single round.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub resolution: Resolution,
    /// Seed for food placement. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            resolution: Resolution::Simultaneous,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        GameConfig { rows, cols, ..Default::default() }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Settings for the terminal front end.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub game: GameConfig,
    pub tick_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols), (20, 70));
        assert_eq!(config.resolution, Resolution::Simultaneous);
        assert_eq!(config.seed, None);
        assert_eq!(AppConfig::default().tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn custom_size_keeps_other_defaults() {
        let config = GameConfig::new(10, 12).with_resolution(Resolution::Sequential);
        assert_eq!((config.rows, config.cols), (10, 12));
        assert_eq!(config.resolution, Resolution::Sequential);
    }
}
