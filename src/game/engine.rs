use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    board::{Board, Position},
    config::GameConfig,
    direction::Direction,
    error::{GameError, Result},
    snake::Snake,
    state::{CollisionType, EndReason, GameEvent, GameState},
};

/// Random draws tried before falling back to a scan of the free cells
pub const MAX_FOOD_ATTEMPTS: usize = 1024;

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the game is over after this tick
    pub terminated: bool,
}

impl TickResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            ate_food,
            collision: None,
            terminated: false,
        }
    }

    fn ended(ate_food: bool, collision: Option<CollisionType>) -> Self {
        Self {
            ate_food,
            collision,
            terminated: true,
        }
    }
}

/// Pick a uniformly random cell that the snake does not occupy.
///
/// Rejection sampling first; once `MAX_FOOD_ATTEMPTS` draws have all hit the
/// snake the free cells are listed and one of them is chosen, so a nearly
/// full board still terminates. A full board is an error.
pub fn generate_food<R: Rng + ?Sized>(
    board: &Board,
    snake: &Snake,
    rng: &mut R,
) -> Result<Position> {
    let cells = board.cell_count();

    for _ in 0..MAX_FOOD_ATTEMPTS {
        let candidate = Position(rng.gen_range(0..cells) as i32);
        if !snake.contains(candidate) {
            return Ok(candidate);
        }
    }

    warn!(
        "food sampling missed {} times (snake length {}), scanning free cells",
        MAX_FOOD_ATTEMPTS,
        snake.len()
    );
    let free: Vec<Position> = board.positions().filter(|&p| !snake.contains(p)).collect();
    if free.is_empty() {
        error!("no free cell left for food on a board of {} cells", cells);
        return Err(GameError::FoodPlacementExhausted { cells });
    }
    Ok(free[rng.gen_range(0..free.len())])
}

/// Reason for the log line, with the error that forced it if any
fn end_summary(reason: EndReason, cause: Option<&GameError>) -> String {
    match cause {
        Some(err) => format!("{} ({err})", reason.describe()),
        None => reason.describe().to_string(),
    }
}

fn rng_for(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Owns one game: the snake, the food, and whether the game is still running
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    snake: Snake,
    food: Position,
    running: bool,
    end_reason: Option<EndReason>,
    pending_direction: Option<Direction>,
    score: u32,
    steps: u32,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl GameEngine {
    /// Create a running game from a configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = rng_for(&config);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let snake = config.initial_snake();
        Self::build(config, snake, rng)
    }

    /// Start from an arbitrary snake instead of the configured one.
    ///
    /// The body is not checked for overlaps, which lets callers set up
    /// positions a real game would never reach.
    pub fn with_snake(config: GameConfig, snake: Snake) -> Result<Self> {
        config.validate()?;
        let rng = rng_for(&config);
        Self::build(config, snake, rng)
    }

    fn build(config: GameConfig, snake: Snake, mut rng: StdRng) -> Result<Self> {
        let board = config.board();
        let food = generate_food(&board, &snake, &mut rng)?;
        debug!(
            "new game on a {}x{} board, head at {}, food at {}",
            board.size,
            board.size,
            snake.head(),
            food
        );

        Ok(Self {
            config,
            board,
            snake,
            food,
            running: true,
            end_reason: None,
            pending_direction: None,
            score: 0,
            steps: 0,
            events: Vec::new(),
            rng,
        })
    }

    /// Throw the current game away and start a fresh one
    pub fn reset(&mut self) -> Result<()> {
        let snake = self.config.initial_snake();
        let food = generate_food(&self.board, &snake, &mut self.rng)?;

        self.snake = snake;
        self.food = food;
        self.running = true;
        self.end_reason = None;
        self.pending_direction = None;
        self.score = 0;
        self.steps = 0;
        self.events.clear();

        debug!("game reset, food at {}", food);
        Ok(())
    }

    /// Buffer a turn for the next tick. Only the latest request is kept.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.running {
            self.pending_direction = Some(direction);
        }
    }

    /// Advance the game by one step.
    ///
    /// A wall hit ends the game with the snake left where it was.
    pub fn tick(&mut self) -> TickResult {
        if !self.running {
            return TickResult::ended(false, None);
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.change_direction(direction);
        }

        let from = self.snake.head();
        let direction = self.snake.direction();
        self.steps += 1;

        // Walls are checked before moving so a fatal step never grows the snake
        if self.board.leaves_board(from, direction) {
            return self.collide(CollisionType::Wall);
        }

        let food = self.food;
        let head = self.snake.advance(food, self.board.size);

        if self.snake.collides_with_body(head) {
            return self.collide(CollisionType::SelfCollision);
        }

        if head != food {
            return TickResult::moved(false);
        }

        self.score += 1;
        if self.snake.len() >= self.board.cell_count() {
            self.finish(EndReason::BoardFilled, None);
            return TickResult::ended(true, None);
        }

        match generate_food(&self.board, &self.snake, &mut self.rng) {
            Ok(next_food) => {
                self.food = next_food;
                debug!("food eaten at {}, next food at {}", head, next_food);
                self.events.push(GameEvent::FoodEaten {
                    at: head,
                    next_food,
                });
                TickResult::moved(true)
            }
            Err(err) => {
                self.finish(EndReason::BoardFilled, Some(&err));
                TickResult::ended(true, None)
            }
        }
    }

    fn collide(&mut self, collision: CollisionType) -> TickResult {
        self.finish(collision.into(), None);
        TickResult::ended(false, Some(collision))
    }

    /// Stop the game from outside. Returns false if it had already ended.
    pub fn end_game(&mut self) -> bool {
        self.finish(EndReason::Stopped, None)
    }

    fn finish(&mut self, reason: EndReason, cause: Option<&GameError>) -> bool {
        if !self.running {
            return false;
        }

        self.running = false;
        self.end_reason = Some(reason);
        self.pending_direction = None;
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });

        info!(
            "game over: {} (score {}, length {}, {} steps)",
            end_summary(reason, cause),
            self.score,
            self.snake.len(),
            self.steps
        );
        true
    }

    /// Move the food to a chosen free cell
    pub fn force_food(&mut self, pos: Position) -> Result<()> {
        if !self.board.contains(pos) || self.snake.contains(pos) {
            return Err(GameError::InvalidFood(pos.0));
        }
        self.food = pos;
        Ok(())
    }

    /// Take the notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            running: self.running,
            board_size: self.board.size,
            snake_body: self.snake.body().collect(),
            food: self.food,
            direction: self.snake.direction(),
            score: self.score,
            steps: self.steps,
            end_reason: self.end_reason,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
