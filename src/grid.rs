use crate::snake::{Direction, Player};

use log::warn;
use rand::{seq::SliceRandom, Rng};

/// Cells between the walls and the area food may spawn in.
const FOOD_MARGIN: i32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    Wall,
    Head(Player),
    Tail(Player),
}

/// Static terrain of a round: the wall ring, the open interior and the
/// current food. Snakes are not stored here, see `game::Board`.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    food: Option<Position>,
}

impl Grid {
    /// Builds a `rows` x `cols` grid walled on every side. Both sides must be
    /// at least 5; `Game::new_round` is the place that checks it.
    pub fn new(rows: usize, cols: usize) -> Self {
        let (rows, cols) = (rows as i32, cols as i32);
        let mut cells = Vec::with_capacity((rows * cols) as usize);

        for y in 0..rows {
            for x in 0..cols {
                let border = y == 0 || y == rows - 1 || x == 0 || x == cols - 1;
                cells.push(if border { Cell::Wall } else { Cell::Empty });
            }
        }

        Grid { rows, cols, cells, food: None }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.cols - 1 || pos.y == self.rows - 1
    }

    /// Terrain at `pos`. Anything off the grid reads as wall.
    pub fn cell(&self, pos: Position) -> Cell {
        if self.contains(pos) {
            self.cells[self.index(pos)]
        } else {
            Cell::Wall
        }
    }

    /// Writes a cell directly.
    ///
    /// # Panics
    ///
    /// No bounds checking beyond the slice's own: `pos` must lie on the grid.
    /// The wall ring is fixed once built, so writing to it trips a debug
    /// assertion.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        debug_assert!(!self.is_border(pos), "border cell {:?} is immutable", pos);
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Moves the food to a random free cell at least one cell away from every
    /// wall. `occupied` reports cells taken by something the grid doesn't
    /// know about, i.e. the snakes. Returns `None` when nothing is free, in
    /// which case the grid is left without food.
    pub fn place_food<R, F>(&mut self, rng: &mut R, occupied: F) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let lo = 1 + FOOD_MARGIN;
        let choices: Vec<Position> = (lo..self.rows - lo)
            .flat_map(|y| (lo..self.cols - lo).map(move |x| Position::new(x, y)))
            .filter(|&pos| self.cell(pos) == Cell::Empty && !occupied(pos))
            .collect();

        let res = choices.choose(rng).copied();
        match res {
            Some(pos) => self.put_food(pos),
            None => {
                warn!("No free cell left for food");
                self.remove_food();
            }
        }

        res
    }

    /// Puts the food at `pos`, taking it off wherever it was before.
    pub fn put_food(&mut self, pos: Position) {
        self.remove_food();
        self.set_cell(pos, Cell::Food);
        self.food = Some(pos);
    }

    /// Clears the current food, if any. Whoever ate it is drawn over the cell.
    pub fn remove_food(&mut self) {
        if let Some(pos) = self.food.take() {
            self.set_cell(pos, Cell::Empty);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Position) -> usize {
        self.cols as usize * pos.y as usize + pos.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn count(grid: &Grid, wanted: Cell) -> usize {
        let mut n = 0;
        for y in 0..grid.rows() as i32 {
            for x in 0..grid.cols() as i32 {
                if grid.cell(Position::new(x, y)) == wanted {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn new_grid_is_walled() {
        let grid = Grid::new(6, 9);

        for y in 0..6 {
            for x in 0..9 {
                let pos = Position::new(x, y);
                let expected = if grid.is_border(pos) { Cell::Wall } else { Cell::Empty };
                assert_eq!(grid.cell(pos), expected, "at {:?}", pos);
            }
        }
        assert_eq!(count(&grid, Cell::Wall), 2 * 9 + 2 * 4);
        assert_eq!(grid.food(), None);
    }

    #[test]
    fn off_grid_reads_as_wall() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.cell(Position::new(-1, 2)), Cell::Wall);
        assert_eq!(grid.cell(Position::new(2, 5)), Cell::Wall);
    }

    #[test]
    fn food_lands_inside_margin() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 12);

        for _ in 0..200 {
            let pos = grid.place_food(&mut rng, |_| false).unwrap();
            assert!(pos.x >= 2 && pos.x <= 12 - 3, "x out of margin: {:?}", pos);
            assert!(pos.y >= 2 && pos.y <= 10 - 3, "y out of margin: {:?}", pos);
            assert_eq!(count(&grid, Cell::Food), 1);
        }
    }

    #[test]
    fn food_moves_elsewhere() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(10, 10);

        let first = grid.place_food(&mut rng, |_| false).unwrap();
        let second = grid.place_food(&mut rng, |_| false).unwrap();

        assert_ne!(first, second);
        assert_eq!(grid.cell(first), Cell::Empty);
        assert_eq!(grid.cell(second), Cell::Food);
    }

    #[test]
    fn food_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(7, 7);
        // The food area is the 3x3 block from (2, 2) to (4, 4); leave only (4, 4).
        let free = Position::new(4, 4);

        for _ in 0..20 {
            assert_eq!(grid.place_food(&mut rng, |pos| pos != free), Some(free));
            grid.remove_food();
        }
    }

    #[test]
    fn no_room_for_food() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(5, 5);

        assert_eq!(grid.place_food(&mut rng, |_| true), None);
        assert_eq!(grid.food(), None);
        assert_eq!(count(&grid, Cell::Food), 0);
    }

    #[test]
    fn remove_food_clears_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::new(8, 8);

        let pos = grid.place_food(&mut rng, |_| false).unwrap();
        grid.remove_food();

        assert_eq!(grid.cell(pos), Cell::Empty);
        assert_eq!(grid.food(), None);
    }

    #[test]
    fn set_cell_writes_interior() {
        let mut grid = Grid::new(5, 5);
        grid.set_cell(Position::new(2, 2), Cell::Wall);
        assert_eq!(grid.cell(Position::new(2, 2)), Cell::Wall);
    }

    #[test]
    #[should_panic]
    fn set_cell_off_grid_panics() {
        let mut grid = Grid::new(5, 5);
        grid.set_cell(Position::new(3, 9), Cell::Food);
    }

    #[test]
    fn step_follows_direction() {
        let p = Position::new(3, 3);
        assert_eq!(p.step(Direction::Up), Position::new(3, 2));
        assert_eq!(p.step(Direction::Down), Position::new(3, 4));
        assert_eq!(p.step(Direction::Left), Position::new(2, 3));
        assert_eq!(p.step(Direction::Right), Position::new(4, 3));
    }
}
