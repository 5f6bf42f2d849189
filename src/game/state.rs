use serde::{Deserialize, Serialize};

use super::board::{Board, Position};
use super::direction::Direction;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a game reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake covers every cell; nothing is left to eat
    BoardFilled,
    /// Ended from outside the engine, e.g. the player quit
    Stopped,
}

impl EndReason {
    pub fn describe(&self) -> &'static str {
        match self {
            EndReason::Collision(CollisionType::Wall) => "hit the wall",
            EndReason::Collision(CollisionType::SelfCollision) => "ran into itself",
            EndReason::BoardFilled => "filled the board",
            EndReason::Stopped => "stopped",
        }
    }
}

impl From<CollisionType> for EndReason {
    fn from(collision: CollisionType) -> Self {
        EndReason::Collision(collision)
    }
}

/// Notifications the engine queues for its collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The snake ate the food at `at`; new food now sits at `next_food`
    FoodEaten { at: Position, next_food: Position },
    /// Fired once per game, when it turns terminal
    GameOver { reason: EndReason, score: u32 },
}

/// Read-only snapshot of a game, handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub running: bool,
    pub board_size: usize,
    /// Head first
    pub snake_body: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub steps: u32,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    pub fn head(&self) -> Option<Position> {
        self.snake_body.first().copied()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake_body.contains(&pos)
    }

    pub fn snake_len(&self) -> usize {
        self.snake_body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameState {
        GameState {
            running: true,
            board_size: 20,
            snake_body: vec![Position(42), Position(41), Position(40)],
            food: Position(100),
            direction: Direction::Right,
            score: 0,
            steps: 0,
            end_reason: None,
        }
    }

    #[test]
    fn test_snapshot_queries() {
        let state = sample();
        assert_eq!(state.head(), Some(Position(42)));
        assert!(state.is_occupied_by_snake(Position(40)));
        assert!(!state.is_occupied_by_snake(Position(100)));
        assert_eq!(state.snake_len(), 3);
        assert_eq!(state.board().cell_count(), 400);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["snake_body"], serde_json::json!([42, 41, 40]));
        assert_eq!(json["food"], 100);
        assert_eq!(json["direction"], "RIGHT");
        assert_eq!(json["end_reason"], serde_json::Value::Null);
    }

    #[test]
    fn test_end_reason_from_collision() {
        let reason: EndReason = CollisionType::Wall.into();
        assert_eq!(reason, EndReason::Collision(CollisionType::Wall));
        assert_eq!(reason.describe(), "hit the wall");
    }
}
