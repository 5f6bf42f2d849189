//! Grid Snake - a single-player snake game on a square board
//!
//! This library provides:
//! - Core game logic (game module)
//! - Tick scheduling (scheduler module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
