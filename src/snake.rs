use std::collections::VecDeque;

use crate::grid::{Cell, Position};
use Direction::*;

pub const INITIAL_POWER: i32 = 200;
pub const COLLISION_POWER_COST: i32 = 25;
pub const COLLISION_SCORE_PENALTY: u32 = 150;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn head_cell(self) -> Cell {
        Cell::Head(self)
    }

    pub fn tail_cell(self) -> Cell {
        Cell::Tail(self)
    }
}

/// One player's snake. The head is at the front of `body`.
#[derive(Clone, Debug)]
pub struct Snake {
    player: Player,
    body: VecDeque<Position>,
    direction: Direction,
    score: u32,
    power: i32,
}

impl Snake {
    pub fn new(player: Player, start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);
        Snake { player, body, direction, score: 0, power: INITIAL_POWER }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn next_head(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Advances one cell. Returns the new head and the cell the tail left.
    /// Whatever is in the way is the caller's problem.
    pub fn move_step(&mut self) -> (Position, Position) {
        let new_head = self.next_head();
        self.body.push_front(new_head);
        // Never empty: we just pushed
        let old_tail = self.body.pop_back().unwrap_or(new_head);
        (new_head, old_tail)
    }

    /// Extends the head one cell forward and keeps the tail where it is.
    pub fn grow(&mut self) -> Position {
        let new_head = self.next_head();
        self.body.push_front(new_head);
        new_head
    }

    /// Turns take effect on the next step. Reversing is allowed; with a
    /// body behind the head that walks straight into the neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn inc_score(&mut self, n: u32) {
        self.score += n;
    }

    pub fn dec_score(&mut self, n: u32) {
        self.score = self.score.saturating_sub(n);
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn drain_power(&mut self, n: i32) {
        self.power -= n;
    }

    pub fn is_exhausted(&self) -> bool {
        self.power <= 0
    }

    /// Penalty for running into a wall or a snake.
    pub fn hit(&mut self) {
        self.drain_power(COLLISION_POWER_COST);
        self.dec_score(COLLISION_SCORE_PENALTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, direction: Direction) -> Snake {
        Snake::new(Player::One, Position::new(x, y), direction)
    }

    #[test]
    fn starts_with_one_segment() {
        let snake = snake_at(6, 6, Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(6, 6));
        assert_eq!(snake.score(), 0);
        assert_eq!(snake.power(), INITIAL_POWER);
    }

    #[test]
    fn move_keeps_length() {
        let mut snake = snake_at(4, 4, Right);
        snake.grow();
        snake.grow();

        let (head, tail) = snake.move_step();

        assert_eq!(head, Position::new(7, 4));
        assert_eq!(tail, Position::new(4, 4));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![
            Position::new(7, 4),
            Position::new(6, 4),
            Position::new(5, 4),
        ]);
    }

    #[test]
    fn single_segment_move_vacates_start() {
        let mut snake = snake_at(3, 3, Up);
        let (head, tail) = snake.move_step();
        assert_eq!(head, Position::new(3, 2));
        assert_eq!(tail, Position::new(3, 3));
        assert!(!snake.occupies(Position::new(3, 3)));
    }

    #[test]
    fn grow_adds_a_head() {
        let mut snake = snake_at(5, 5, Down);
        let head = snake.grow();
        assert_eq!(head, Position::new(5, 6));
        assert_eq!(snake.head(), head);
        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn turn_applies_on_next_step() {
        let mut snake = snake_at(5, 5, Right);
        snake.set_direction(Up);
        assert_eq!(snake.next_head(), Position::new(5, 4));
        snake.move_step();
        assert_eq!(snake.head(), Position::new(5, 4));
    }

    #[test]
    fn reversal_points_into_neck() {
        let mut snake = snake_at(5, 5, Right);
        snake.grow();
        snake.set_direction(Left);
        assert_eq!(snake.direction(), Left);
        assert!(snake.occupies(snake.next_head()));
    }

    #[test]
    fn score_never_negative() {
        let mut snake = snake_at(5, 5, Right);
        snake.inc_score(100);
        snake.dec_score(150);
        assert_eq!(snake.score(), 0);

        snake.inc_score(300);
        snake.dec_score(150);
        assert_eq!(snake.score(), 150);
    }

    #[test]
    fn hit_costs_power_and_score() {
        let mut snake = snake_at(5, 5, Right);
        snake.inc_score(400);
        snake.hit();
        assert_eq!(snake.power(), INITIAL_POWER - 25);
        assert_eq!(snake.score(), 250);
    }

    #[test]
    fn exhausted_at_zero_power() {
        let mut snake = snake_at(5, 5, Right);
        snake.drain_power(INITIAL_POWER - COLLISION_POWER_COST);
        assert!(!snake.is_exhausted());
        snake.hit();
        assert_eq!(snake.power(), 0);
        assert!(snake.is_exhausted());
    }
}
