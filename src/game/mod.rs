//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Positions are pixel-aligned cells, so the renderer can draw them directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepOutcome};
pub use scheduler::TickScheduler;
pub use state::{GameState, Position, Snake};
