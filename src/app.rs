use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, Simulation};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::stats::SessionStats;

/// Owns the terminal and runs the tick/render/input loop around one game
///
/// The simulation never sees the terminal; keys funnel into it as
/// direction requests and the renderer reads it back out once per frame.
pub struct App {
    config: GameConfig,
    sim: Simulation,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let sim = Simulation::new(config.clone())?;

        Ok(Self {
            config,
            sim,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal; the UI lives on stderr so stdout stays clean
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation speed comes from the config; the first tick fires
        // immediately, so the snake moves as soon as the screen is up.
        let mut tick_timer = interval(self.config.tick_period());

        // Repaint at ~30 fps independent of game speed, which keeps the
        // clock, resizes and the game-over screen fresh between ticks.
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.tick_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.refresh();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.sim.request_direction(direction),
                KeyAction::Restart => self.restart_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn tick_game(&mut self) {
        // The timer keeps firing, but a stopped simulation is not ticked
        if !self.sim.is_running() {
            return;
        }

        let outcome = self.sim.tick();
        if outcome.collision.is_some() {
            self.stats.game_over(self.sim.score());
        }
    }

    fn restart_game(&mut self) -> Result<()> {
        // Stopped is terminal for a simulation instance; restarting swaps
        // in a brand-new one.
        self.sim = Simulation::new(self.config.clone())?;
        self.stats.game_started();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// Unsteered, the snake marches from the center of a 10-tile board
    /// into the right wall on the fifth tick.
    fn run_into_wall(app: &mut App) {
        for _ in 0..5 {
            app.tick_game();
        }
        assert!(!app.sim.is_running());
    }

    #[test]
    fn test_app_starts_with_a_running_game() {
        let app = App::new(GameConfig::default()).unwrap();
        assert!(app.sim.is_running());
        assert_eq!(app.sim.score(), 0);
    }

    #[test]
    fn test_app_rejects_invalid_config() {
        let config = GameConfig {
            apple_rarity: 2.0,
            ..Default::default()
        };
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_restart_replaces_the_game() {
        let mut app = App::new(GameConfig::new(10)).unwrap();
        run_into_wall(&mut app);

        app.restart_game().unwrap();

        assert!(app.sim.is_running());
        assert_eq!(app.sim.score(), 0);
        assert_eq!(app.sim.snake().head(), Cell::new(5, 5));
    }

    #[test]
    fn test_game_over_lands_in_session_stats() {
        let mut app = App::new(GameConfig::new(10)).unwrap();
        run_into_wall(&mut app);

        assert_eq!(app.stats.games_played(), 1);

        // Further timer fires leave the stopped game alone
        app.tick_game();
        assert_eq!(app.stats.games_played(), 1);
    }
}
