use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::board::{Board, Position};
use super::direction::Direction;
use super::error::{GameError, Result};
use super::snake::{DEFAULT_BODY, Snake};

/// Largest board whose cell indices still fit comfortably in an `i32`
pub const MAX_BOARD_SIZE: usize = 1 << 14;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square board
    pub board_size: usize,
    /// Time between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Starting body as row-major cells, head first, facing right.
    /// `None` uses the classic `[42, 41, 40]` when it fits, otherwise a
    /// short snake in the middle of the board.
    pub initial_body: Option<Vec<i32>>,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            tick_interval_ms: 200,
            initial_body: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> AnyResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check the configuration before a game is built from it
    pub fn validate(&self) -> Result<()> {
        if self.board_size < 2 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "board size must be between 2 and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick interval must be positive".to_string(),
            ));
        }
        if let Some(body) = &self.initial_body {
            validate_body(&self.board(), body)?;
        }
        Ok(())
    }

    /// The snake a new game starts with
    pub fn initial_snake(&self) -> Snake {
        let board = self.board();
        let body = match &self.initial_body {
            Some(body) => body.as_slice(),
            None if validate_body(&board, &DEFAULT_BODY).is_ok() => return Snake::default(),
            None => return Snake::centered(&board, DEFAULT_BODY.len()),
        };
        Snake::new(body.iter().copied().map(Position), Direction::Right)
            .unwrap_or_else(|| Snake::centered(&board, DEFAULT_BODY.len()))
    }
}

fn validate_body(board: &Board, body: &[i32]) -> Result<()> {
    if body.is_empty() {
        return Err(GameError::InvalidConfig(
            "initial body must have at least one segment".to_string(),
        ));
    }
    // The snake needs a free cell for its first food
    if body.len() >= board.cell_count() {
        return Err(GameError::InvalidConfig(format!(
            "initial body of {} segments leaves no room on a {}x{} board",
            body.len(),
            board.size,
            board.size
        )));
    }
    let mut seen = HashSet::with_capacity(body.len());
    for &cell in body {
        if !board.contains(Position(cell)) {
            return Err(GameError::InvalidConfig(format!(
                "initial body cell {cell} is off the board"
            )));
        }
        if !seen.insert(cell) {
            return Err(GameError::InvalidConfig(format!(
                "initial body overlaps itself at cell {cell}"
            )));
        }
    }
    for pair in body.windows(2) {
        let (front, back) = (Position(pair[0]), Position(pair[1]));
        if !board.adjacent(front, back) {
            return Err(GameError::InvalidConfig(format!(
                "initial body segments {front} and {back} are not neighbours"
            )));
        }
    }
    // A new game starts moving right, so the neck cannot sit there
    let head = Position(body[0]);
    if body.len() > 1 && Position(body[1]) == head.stepped(Direction::Right, board.size) {
        return Err(GameError::InvalidConfig(
            "initial body faces left but the game starts moving right".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_snake_fits() {
        let snake = GameConfig::default().initial_snake();
        assert_eq!(snake, Snake::default());
    }

    #[test]
    fn test_small_board_falls_back_to_centered_snake() {
        let config = GameConfig::new(5);
        let snake = config.initial_snake();
        assert_eq!(snake.head(), Position(12));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_custom_body() {
        let config = GameConfig {
            initial_body: Some(vec![5, 4]),
            ..GameConfig::small()
        };
        assert!(config.validate().is_ok());
        let body: Vec<_> = config.initial_snake().body().collect();
        assert_eq!(body, vec![Position(5), Position(4)]);
    }

    #[test]
    fn test_default_body_split_across_rows_is_not_used() {
        // on 7, 14 and 21 columns cell 42 starts a row and 41 ends the previous one
        for size in [7, 14, 21] {
            let config = GameConfig::new(size);
            assert!(validate_body(&config.board(), &DEFAULT_BODY).is_err());

            let snake = config.initial_snake();
            let board = config.board();
            let cells: Vec<_> = snake.body().collect();
            assert_eq!(snake.len(), 3);
            assert_eq!(cells[0], board.center());
            assert!(cells.iter().all(|&p| board.row(p) == board.row(cells[0])));
        }
    }

    #[test]
    fn test_initial_body_must_be_contiguous() {
        let split = GameConfig {
            initial_body: Some(vec![5, 3]),
            ..GameConfig::small()
        };
        assert!(matches!(split.validate(), Err(GameError::InvalidConfig(_))));

        let wrapped = GameConfig {
            initial_body: Some(vec![10, 9]),
            ..GameConfig::small()
        };
        assert!(wrapped.validate().is_err());

        let vertical = GameConfig {
            initial_body: Some(vec![15, 5]),
            ..GameConfig::small()
        };
        assert!(vertical.validate().is_ok());
    }

    #[test]
    fn test_initial_neck_in_the_starting_direction() {
        let backwards = GameConfig {
            initial_body: Some(vec![4, 5]),
            ..GameConfig::small()
        };
        assert!(matches!(
            backwards.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(GameConfig::new(1).validate().is_err());

        let zero_tick = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(zero_tick.validate().is_err());

        let off_board = GameConfig {
            initial_body: Some(vec![400]),
            ..Default::default()
        };
        assert!(matches!(
            off_board.validate(),
            Err(GameError::InvalidConfig(_))
        ));

        let overlapping = GameConfig {
            initial_body: Some(vec![3, 3]),
            ..Default::default()
        };
        assert!(overlapping.validate().is_err());

        let empty = GameConfig {
            initial_body: Some(vec![]),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_size": 12, "seed": 7 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_interval_ms, 200);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
