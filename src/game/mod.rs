//! Core game logic
//!
//! Everything in here is pure simulation with no I/O, terminal or timing
//! dependencies: the coordinate space, the snake state machine and the
//! tick orchestrator that drives one game.

pub mod config;
pub mod direction;
pub mod grid;
pub mod simulation;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use grid::{Cell, Grid};
pub use simulation::{Collision, RunState, Simulation, TickOutcome};
pub use snake::Snake;
