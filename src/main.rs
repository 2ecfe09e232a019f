use anyhow::Result;
use clap::{Parser, ValueEnum};
use tilesnake::app::App;
use tilesnake::game::{Direction, GameConfig};

#[derive(Parser)]
#[command(name = "tilesnake")]
#[command(version, about = "Tick-driven snake game for the terminal")]
struct Cli {
    /// Board width and height in tiles
    #[arg(long, default_value = "40")]
    tiles_x: usize,

    /// Simulation ticks per second
    #[arg(long, default_value = "10")]
    fps: u32,

    /// Per-tick probability of spawning an apple, in [0, 1]
    #[arg(long, default_value = "0.1")]
    apple_rarity: f64,

    /// Maximum number of apples on the board at once
    #[arg(long, default_value = "5")]
    max_apples: usize,

    /// Snake length at game start
    #[arg(long, default_value = "5")]
    initial_length: usize,

    /// Direction the snake moves in at game start
    #[arg(long, default_value = "right")]
    initial_direction: DirectionArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        fps: cli.fps,
        apple_rarity: cli.apple_rarity,
        max_apples: cli.max_apples,
        tiles_x: cli.tiles_x,
        initial_length: cli.initial_length,
        initial_direction: cli.initial_direction.into(),
    };

    // Bad flags are rejected here, before the terminal is touched
    let mut app = App::new(config)?;
    app.run().await
}
