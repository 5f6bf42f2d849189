use serde::{Deserialize, Serialize};
use std::fmt;

use super::direction::Direction;

/// A cell on the board as a row-major index
///
/// The index is signed so that a step off the top or left edge yields a
/// negative value the engine can reject, instead of underflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub i32);

impl Position {
    pub fn new(index: i32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> i32 {
        self.0
    }

    /// Position one step away, with no bounds checking
    pub fn stepped(&self, direction: Direction, board_size: usize) -> Self {
        Self(self.0 + direction.offset(board_size))
    }
}

impl From<i32> for Position {
    fn from(index: i32) -> Self {
        Self(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Square board of `size × size` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Whether the index lies in `[0, size²)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.0 >= 0 && (pos.0 as usize) < self.cell_count()
    }

    pub fn row(&self, pos: Position) -> i32 {
        pos.0.div_euclid(self.size as i32)
    }

    pub fn col(&self, pos: Position) -> i32 {
        pos.0.rem_euclid(self.size as i32)
    }

    pub fn at(&self, row: usize, col: usize) -> Position {
        Position((row * self.size + col) as i32)
    }

    pub fn center(&self) -> Position {
        self.at(self.size / 2, self.size / 2)
    }

    /// Whether stepping from `from` in `direction` leaves the board.
    ///
    /// Horizontal steps never wrap onto the neighbouring row.
    pub fn leaves_board(&self, from: Position, direction: Direction) -> bool {
        let to = from.stepped(direction, self.size);
        if !self.contains(to) {
            return true;
        }
        direction.is_horizontal() && self.row(from) != self.row(to)
    }

    /// Whether `b` is one on-board step away from `a`
    pub fn adjacent(&self, a: Position, b: Position) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| !self.leaves_board(a, dir) && a.stepped(dir, self.size) == b)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..self.cell_count() as i32).map(Position)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(20)
    }
}
