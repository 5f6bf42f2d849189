//! Core game logic module for Snake
//!
//! Positions are row-major cell indices on a square board. This module has no
//! I/O or rendering dependencies; front ends drive it through [`GameEngine`]
//! and read [`GameState`] snapshots.

pub mod board;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use board::{Board, Position};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickResult, generate_food};
pub use error::GameError;
pub use snake::Snake;
pub use state::{CollisionType, EndReason, GameEvent, GameState};
