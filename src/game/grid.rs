use rand::Rng;

use super::direction::Direction;

/// A cell on the game grid
///
/// Out-of-range coordinates are representable on purpose: advancing the
/// snake can produce a head outside the grid, a transient state the
/// simulation resolves as a wall collision on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by a delta
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The adjacent cell one step in a direction
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// The square coordinate space of the board: `tiles_x` cells per side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tiles_x: usize,
}

impl Grid {
    pub fn new(tiles_x: usize) -> Self {
        Self { tiles_x }
    }

    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    /// The cell the snake head starts on
    pub fn center(&self) -> Cell {
        let mid = (self.tiles_x / 2) as i32;
        Cell::new(mid, mid)
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.tiles_x as i32
            && cell.y >= 0
            && cell.y < self.tiles_x as i32
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.tiles_x * self.tiles_x
    }

    /// A uniformly random in-bounds cell
    pub fn random_cell(&self, rng: &mut impl Rng) -> Cell {
        let x = rng.gen_range(0..self.tiles_x) as i32;
        let y = rng.gen_range(0..self.tiles_x) as i32;
        Cell::new(x, y)
    }
}
