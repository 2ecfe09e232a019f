use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::Grid;

/// Construction-time configuration for one game
///
/// Accepted once, up front; there is no runtime reconfiguration. Invalid
/// values are rejected loudly by [`validate`](GameConfig::validate) rather
/// than clamped, so a bad flag never silently turns into a different game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Simulation ticks per second
    pub fps: u32,
    /// Per-tick probability of spawning an apple, in [0, 1]
    pub apple_rarity: f64,
    /// Upper bound on simultaneously active apples
    pub max_apples: usize,
    /// Board width and height in tiles
    pub tiles_x: usize,
    /// Snake length at game start
    pub initial_length: usize,
    /// Direction the snake moves in at game start
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            apple_rarity: 0.1,
            max_apples: 5,
            tiles_x: 40,
            initial_length: 5,
            initial_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Configuration with a custom board size and default everything else
    pub fn new(tiles_x: usize) -> Self {
        Self {
            tiles_x,
            ..Default::default()
        }
    }

    /// Check every knob, rejecting rather than clamping
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tiles_x > 0, "tiles_x must be positive");
        // The tick period is 1000 / fps in whole milliseconds, so anything
        // above 1000 would round down to a zero-length timer.
        ensure!(
            (1..=1000).contains(&self.fps),
            "fps must be between 1 and 1000, got {}",
            self.fps
        );
        ensure!(
            (0.0..=1.0).contains(&self.apple_rarity),
            "apple_rarity must be within [0, 1], got {}",
            self.apple_rarity
        );
        ensure!(self.initial_length > 0, "initial snake length must be positive");

        // The spawn loop rejects cells that already hold an apple; capping
        // the apple count at the cell count keeps that loop finite.
        ensure!(
            self.max_apples <= self.grid().cell_count(),
            "max_apples ({}) exceeds the {} cells of the board",
            self.max_apples,
            self.grid().cell_count()
        );

        // The head starts on the center cell with the body trailing
        // backwards; the starting tail must still be on the board.
        let head = self.grid().center();
        let (dx, dy) = self.initial_direction.delta();
        let back = (self.initial_length - 1) as i32;
        let tail = head.offset(-dx * back, -dy * back);
        ensure!(
            self.grid().contains(tail),
            "initial snake length {} does not fit a {}-tile board",
            self.initial_length,
            self.tiles_x
        );

        Ok(())
    }

    /// The coordinate space this configuration describes
    pub fn grid(&self) -> Grid {
        Grid::new(self.tiles_x)
    }

    /// Tick period derived from `fps`
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps))
    }
}
