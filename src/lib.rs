//! tilesnake - a tick-driven snake game for the terminal
//!
//! This library provides:
//! - Core simulation logic (game module): grid, snake and the tick
//!   orchestrator, free of any I/O
//! - Key-to-intent translation (input module)
//! - TUI rendering of the simulation's observable state (render module)
//! - Per-session counters shown in the header (stats module)
//! - Terminal lifecycle and the tick/render/input loop (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod stats;
