use std::collections::HashSet;

use anyhow::Result;
use rand::rngs::ThreadRng;
use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The head left the board
    Wall,
    /// The head ran into another body segment
    SelfHit,
}

/// Whether the simulation still accepts ticks
///
/// Stopped is terminal for a simulation instance; starting over means
/// building a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake consumed an apple this tick
    pub ate_apple: bool,
    /// The collision that stopped the game this tick, if any
    pub collision: Option<Collision>,
}

/// The tick-driven game state machine
///
/// Owns the snake, the active apples, the score and the RNG; one call to
/// [`tick`](Simulation::tick) advances the world by exactly one step:
/// move, collide, spawn, consume. Everything else reads state through the
/// accessors, and the only input-side mutation is
/// [`request_direction`](Simulation::request_direction).
pub struct Simulation {
    config: GameConfig,
    snake: Snake,
    apples: HashSet<Cell>,
    score: u32,
    run_state: RunState,
    collision: Option<Collision>,
    rng: ThreadRng,
}

impl Simulation {
    /// Build a fresh game from a validated configuration
    ///
    /// Fails fast on an invalid configuration instead of clamping it.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let snake = Snake::new(
            config.grid().center(),
            config.initial_direction,
            config.initial_length,
        );

        Ok(Self {
            config,
            snake,
            apples: HashSet::new(),
            score: 0,
            run_state: RunState::Running,
            collision: None,
            rng: rand::thread_rng(),
        })
    }

    /// Advance the world by one tick
    ///
    /// While running: move the snake, stop on a terminal collision,
    /// otherwise roll for an apple spawn and consume any apple under the
    /// new head. A stopped simulation ignores ticks.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state == RunState::Stopped {
            return TickOutcome {
                ate_apple: false,
                collision: None,
            };
        }

        let new_head = self.snake.advance();

        if let Some(collision) = self.check_collision(new_head) {
            self.collision = Some(collision);
            self.run_state = RunState::Stopped;
            return TickOutcome {
                ate_apple: false,
                collision: Some(collision),
            };
        }

        self.maybe_spawn_apple();

        let ate_apple = self.apples.remove(&new_head);
        if ate_apple {
            self.snake.grow();
            self.score += 1;
        }

        TickOutcome {
            ate_apple,
            collision: None,
        }
    }

    /// Buffer a direction change for the next tick
    ///
    /// Safe to call any number of times between ticks; the snake keeps
    /// the latest non-reversing request.
    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    fn check_collision(&self, new_head: Cell) -> Option<Collision> {
        if !self.grid().contains(new_head) {
            return Some(Collision::Wall);
        }

        if self.snake.head_overlaps_body() {
            return Some(Collision::SelfHit);
        }

        None
    }

    fn maybe_spawn_apple(&mut self) {
        if !self.should_spawn_apple() {
            return;
        }

        // Rejection-sample a cell no other apple holds. The snake body is
        // deliberately not consulted: an apple may spawn under the snake
        // and sit there until the snake moves away. Config validation caps
        // max_apples at the cell count, so a free cell always exists here.
        let apple = loop {
            let cell = self.grid().random_cell(&mut self.rng);
            if !self.apples.contains(&cell) {
                break cell;
            }
        };

        self.apples.insert(apple);
    }

    fn should_spawn_apple(&mut self) -> bool {
        if self.apples.len() >= self.config.max_apples {
            return false;
        }
        self.rng.gen::<f64>() < self.config.apple_rarity
    }

    pub fn grid(&self) -> Grid {
        self.config.grid()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apples(&self) -> &HashSet<Cell> {
        &self.apples
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// The collision that ended the game, once stopped
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }
}
