use rand::Rng;

use crate::game::{Game, Outcome};
use crate::grid::Cell;
use crate::snake::Player;

pub fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Food => 'F',
        Cell::Wall => 'X',
        Cell::Head(Player::One) => '1',
        Cell::Head(Player::Two) => '2',
        Cell::Tail(_) => '0',
    }
}

/// One string per grid row, top to bottom.
pub fn render_rows(snapshot: &[Vec<Cell>]) -> Vec<String> {
    snapshot
        .iter()
        .map(|row| row.iter().copied().map(cell_char).collect())
        .collect()
}

pub fn status_line<R: Rng>(game: &Game<R>) -> String {
    let one = game.snake(Player::One);
    let two = game.snake(Player::Two);
    format!(
        "PLAYER 1 POWER {:<4} SCORE {:<6} PLAYER 2 POWER {:<4} SCORE {}",
        one.power(),
        one.score(),
        two.power(),
        two.score()
    )
}

pub fn outcome_banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(Player::One) => "PLAYER 1 WINS!",
        Outcome::Winner(Player::Two) => "PLAYER 2 WINS!",
        Outcome::Tie => "NOBODY WINS!",
    }
}
