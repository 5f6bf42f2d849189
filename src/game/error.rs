use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell on the board is covered by the snake
    #[error("no free cell left for food on a board of {cells} cells")]
    FoodPlacementExhausted { cells: usize },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    /// Food must sit on the board and off the snake
    #[error("cannot place food at cell {0}")]
    InvalidFood(i32),
}

pub type Result<T> = std::result::Result<T, GameError>;
