//! The two-player simulation. Nothing in here touches the terminal: the
//! front end feeds a pair of `Intent`s into `Game::tick` and reads the board
//! back out.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::config::{GameConfig, Resolution, MIN_GRID_SIDE};
use crate::grid::{Cell, Grid, Position};
use crate::snake::{Direction::{self, *}, Player, Snake};

pub const FOOD_SCORE: u32 = 100;

/// Row and column both snakes start on, when the grid is big enough.
const START_OFFSET: i32 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a {rows}x{cols} grid is too small, both sides must be at least {min}")]
    GridTooSmall { rows: usize, cols: usize, min: usize },
}

/// What a player asked for during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub turn: Option<Direction>,
    /// Debug aid: grow instead of moving if the way ahead is clear.
    pub force_grow: bool,
}

impl Intent {
    pub fn turn(direction: Direction) -> Self {
        Intent { turn: Some(direction), force_grow: false }
    }

    pub fn grow() -> Self {
        Intent { turn: None, force_grow: true }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Snake(Player),
    /// Both snakes went for the same cell in the same tick.
    HeadOn,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Moved,
    Grew,
    Ate,
    Collided(Collision),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    events: [Option<Event>; 2],
}

impl TickReport {
    pub fn event(&self, player: Player) -> Option<Event> {
        self.events[player.index()]
    }

    pub fn any_collision(&self) -> bool {
        self.events.iter().any(|ev| matches!(ev, Some(Event::Collided(_))))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    pub fn from_scores(one: u32, two: u32) -> Self {
        if one > two {
            Outcome::Winner(Player::One)
        } else if two > one {
            Outcome::Winner(Player::Two)
        } else {
            Outcome::Tie
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Plan {
    Collide(Collision),
    Eat,
    Advance { grow: bool },
}

/// Terrain with both snakes laid over it. This is what collisions are
/// checked against and what gets drawn.
pub struct Board<'a> {
    grid: &'a Grid,
    snakes: &'a [Snake; 2],
}

impl<'a> Board<'a> {
    pub fn cell(&self, pos: Position) -> Cell {
        if let Some(s) = self.snakes.iter().find(|s| s.head() == pos) {
            return s.player().head_cell();
        }
        if let Some(s) = self.snakes.iter().find(|s| s.occupies(pos)) {
            return s.player().tail_cell();
        }
        self.grid.cell(pos)
    }

    /// Rows outer, columns inner.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        let mut rows: Vec<Vec<Cell>> = (0..self.grid.rows() as i32)
            .map(|y| (0..self.grid.cols() as i32).map(|x| self.grid.cell(Position::new(x, y))).collect())
            .collect();

        for snake in self.snakes {
            for (i, pos) in snake.body().iter().enumerate() {
                let cell = if i == 0 { snake.player().head_cell() } else { snake.player().tail_cell() };
                rows[pos.y as usize][pos.x as usize] = cell;
            }
        }

        rows
    }
}

pub struct Game<R = StdRng> {
    grid: Grid,
    snakes: [Snake; 2],
    rng: R,
    resolution: Resolution,
    over: bool,
    ticks: u64,
}

impl Game<StdRng> {
    pub fn new_round(config: &GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        let (rows, cols) = (config.rows, config.cols);
        check_dimensions(rows, cols)?;

        let (start_one, start_two) = start_positions(rows as i32, cols as i32);
        let mut game = Game {
            grid: Grid::new(rows, cols),
            snakes: [
                Snake::new(Player::One, start_one, Right),
                Snake::new(Player::Two, start_two, Left),
            ],
            rng,
            resolution: config.resolution,
            over: false,
            ticks: 0,
        };
        game.respawn_food();

        info!("New {}x{} round, {:?} resolution", rows, cols, config.resolution);
        Ok(game)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self, player: Player) -> &Snake {
        &self.snakes[player.index()]
    }

    pub fn board(&self) -> Board<'_> {
        Board { grid: &self.grid, snakes: &self.snakes }
    }

    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.board().snapshot()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// `None` while the round is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.over {
            return None;
        }
        let [one, two] = &self.snakes;
        Some(Outcome::from_scores(one.score(), two.score()))
    }

    /// Runs one step for both players. Does nothing once the round is over.
    pub fn tick(&mut self, one: Intent, two: Intent) -> TickReport {
        let mut report = TickReport::default();
        if self.over {
            return report;
        }

        let intents = [one, two];
        for (snake, intent) in self.snakes.iter_mut().zip(intents.iter()) {
            if let Some(dir) = intent.turn {
                snake.set_direction(dir);
            }
        }

        match self.resolution {
            Resolution::Simultaneous => {
                let mut plans = [self.plan(0, one.force_grow), self.plan(1, two.force_grow)];

                let clash = self.snakes[0].next_head() == self.snakes[1].next_head();
                if clash && plans.iter().all(|p| !matches!(p, Plan::Collide(_))) {
                    plans = [Plan::Collide(Collision::HeadOn); 2];
                }

                let mut ate = false;
                for (i, plan) in plans.iter().enumerate() {
                    let ev = self.apply(i, *plan);
                    ate |= ev == Event::Ate;
                    report.events[i] = Some(ev);
                }
                if ate {
                    self.respawn_food();
                }
            }
            Resolution::Sequential => {
                for (i, intent) in intents.iter().enumerate() {
                    let plan = self.plan(i, intent.force_grow);
                    let ev = self.apply(i, plan);
                    if ev == Event::Ate {
                        self.respawn_food();
                    }
                    report.events[i] = Some(ev);
                }
            }
        }

        self.ticks += 1;

        if self.snakes.iter().any(Snake::is_exhausted) {
            self.over = true;
            let [one, two] = &self.snakes;
            info!(
                "Round over after {} ticks, scores {} - {}",
                self.ticks,
                one.score(),
                two.score()
            );
        }

        report
    }

    ///////////////////////////////////////////////////////////////////////////

    fn plan(&self, i: usize, force_grow: bool) -> Plan {
        let target = self.snakes[i].next_head();
        match self.board().cell(target) {
            Cell::Wall => Plan::Collide(Collision::Wall),
            Cell::Head(p) | Cell::Tail(p) => Plan::Collide(Collision::Snake(p)),
            Cell::Food => Plan::Eat,
            Cell::Empty => Plan::Advance { grow: force_grow },
        }
    }

    fn apply(&mut self, i: usize, plan: Plan) -> Event {
        let snake = &mut self.snakes[i];
        match plan {
            Plan::Collide(what) => {
                snake.hit();
                debug!(
                    "Player {} heading {:?} hit {:?}: power {}, score {}",
                    snake.player().number(),
                    snake.direction(),
                    what,
                    snake.power(),
                    snake.score()
                );
                Event::Collided(what)
            }
            Plan::Eat => {
                snake.grow();
                snake.inc_score(FOOD_SCORE);
                debug!("Player {} ate, length {}", snake.player().number(), snake.len());
                self.grid.remove_food();
                Event::Ate
            }
            Plan::Advance { grow: true } => {
                snake.grow();
                Event::Grew
            }
            Plan::Advance { grow: false } => {
                snake.move_step();
                Event::Moved
            }
        }
    }

    fn respawn_food(&mut self) {
        let snakes = &self.snakes;
        let placed = self.grid.place_food(&mut self.rng, |pos| snakes.iter().any(|s| s.occupies(pos)));
        if let Some(pos) = placed {
            debug!("Food at ({}, {})", pos.x, pos.y);
        }
    }
}

pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), GameError> {
    if rows < MIN_GRID_SIDE || cols < MIN_GRID_SIDE {
        return Err(GameError::GridTooSmall { rows, cols, min: MIN_GRID_SIDE });
    }
    Ok(())
}

/// Player one near the top left heading right, player two further along the
/// same row heading left. Pulled inwards on small grids so both start inside
/// the walls on separate cells.
fn start_positions(rows: i32, cols: i32) -> (Position, Position) {
    let y = START_OFFSET.min(rows - 2);
    let one_x = START_OFFSET.min(cols - 2);
    let mut two_x = (cols - START_OFFSET).clamp(1, cols - 2);
    if two_x == one_x {
        two_x -= 1;
    }
    (Position::new(one_x, y), Position::new(two_x, y))
}
