use std::thread::sleep;

use anyhow::{bail, Result};
use log::{debug, info};

use two_snakes::config::AppConfig;
use two_snakes::controls::{command_for, is_ctrl_c, Command, Intents};
use two_snakes::game::{self, Game, Outcome};
use two_snakes::snake::Player;
use two_snakes::view;

use crate::TermInt;
use crate::term::TermManager;

const TITLE: &str = "TWO SNAKES";
/// Terminal row the grid's top wall is drawn on.
const GRID_TOP: TermInt = 2;

/// What to do once a round is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    PlayAgain,
    Quit,
}

pub struct TwoSnakes {
    config: AppConfig,
    term: TermManager,
}

impl TwoSnakes {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(TwoSnakes { config, term: TermManager::new()? })
    }

    /// Checks the round settings and the terminal size, then takes over the
    /// screen. Nothing is touched if either check fails.
    pub fn initialize(&mut self) -> Result<()> {
        let (rows, cols) = (self.config.game.rows, self.config.game.cols);
        game::check_dimensions(rows, cols)?;

        let (w, h) = self.term.get_terminal_size();
        let needed = (cols, rows + GRID_TOP as usize + 1);
        if (w as usize) < needed.0 || (h as usize) < needed.1 {
            bail!(
                "terminal is {}x{} but a {}x{} grid needs at least {}x{}",
                w, h, rows, cols, needed.0, needed.1
            );
        }

        self.term.setup()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Intro, then rounds until someone quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        while self.play()? == Flow::PlayAgain {}

        info!("Quitting");
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            TITLE,
            "",
            "PLAYER 1: w a s d   (b to grow)",
            "PLAYER 2: u h j k   or arrow keys",
            "",
            "Esc ends the round, CTRL+C quits",
            "",
            "Press any key to play!"
        ];

        self.term.clear()?;
        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(false);
        }

        self.term.hide_message()?;
        Ok(true)
    }

    pub fn play(&mut self) -> Result<Flow> {
        let mut game = Game::new_round(&self.config.game)?;
        let mut intents = Intents::default();

        self.term.clear()?;
        self.term.print_str_at((0, 0), TITLE)?;
        self.draw(&game)?;

        while !game.is_over() {
            sleep(self.config.tick_interval);

            for key_ev in self.term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(Flow::Quit),
                    Some(Command::EndRound) => {
                        debug!("Round ended early after {} ticks", game.ticks());
                        return self.game_over(&game);
                    }
                    Some(cmd) => intents.apply(cmd),
                    None => {}
                }
            }

            let (one, two) = intents.take();
            let report = game.tick(one, two);
            if report.any_collision() {
                self.term.bell()?;
            }

            self.draw(&game)?;
        }

        self.game_over(&game)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw(&mut self, game: &Game) -> Result<()> {
        let rows = view::render_rows(&game.snapshot());
        self.term.draw_lines((0, GRID_TOP), &rows)?;

        let status_row = GRID_TOP + rows.len() as TermInt;
        self.term.print_str_at((0, status_row), &view::status_line(game))?;
        self.term.flush()
    }

    fn game_over(&mut self, game: &Game) -> Result<Flow> {
        let one = game.snake(Player::One).score();
        let two = game.snake(Player::Two).score();
        let outcome = game.outcome().unwrap_or_else(|| Outcome::from_scores(one, two));
        info!("Final scores {} - {}: {:?}", one, two, outcome);

        // Drop whatever was typed during the round
        self.term.read_key_events_queue()?;

        self.term.show_message(&[
            "G A M E   O V E R !",
            "",
            view::outcome_banner(outcome),
            "",
            "ESC = EXIT",
            "ANY KEY = START AGAIN"
        ])?;

        let key = self.term.read_key_blocking()?;
        let flow = match command_for(&key) {
            Some(Command::Quit) | Some(Command::EndRound) => Flow::Quit,
            _ => Flow::PlayAgain,
        };

        self.term.hide_message()?;
        Ok(flow)
    }
}
