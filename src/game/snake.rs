use std::collections::VecDeque;

use super::board::{Board, Position};
use super::direction::Direction;

/// Body cells the classic game starts with on a 20×20 board
pub const DEFAULT_BODY: [i32; 3] = [42, 41, 40];

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
}

impl Snake {
    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn new(body: impl IntoIterator<Item = Position>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Position> = body.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Horizontal snake of `length` cells facing right, head on the board centre
    pub fn centered(board: &Board, length: usize) -> Self {
        let head = board.center();
        let length = length.clamp(1, board.size / 2 + 1);
        let body = (0..length as i32).map(|i| Position(head.0 - i)).collect();
        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Segments head first
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a live snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Turn unless the request is a 180-degree reversal, which is ignored
    pub fn change_direction(&mut self, requested: Direction) {
        if !self.direction.is_opposite(requested) {
            self.direction = requested;
        }
    }

    /// Move one cell in the current direction and return the new head.
    ///
    /// The tail is kept when the new head lands on `food`, which is how the
    /// snake grows. No bounds checking happens here.
    pub fn advance(&mut self, food: Position, board_size: usize) -> Position {
        let new_head = self.head().stepped(self.direction, board_size);
        self.body.push_front(new_head);

        if new_head != food {
            self.body.pop_back();
        }

        new_head
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self {
            body: DEFAULT_BODY.iter().copied().map(Position).collect(),
            direction: Direction::Right,
        }
    }
}
