use std::time::{Duration, Instant};

/// Stats for one sitting: wall clock, games played, best score
///
/// Lives in memory only; the session best is not a persisted high score.
pub struct SessionStats {
    started_at: Instant,
    elapsed: Duration,
    games_played: u32,
    best_score: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed: Duration::ZERO,
            games_played: 0,
            best_score: 0,
        }
    }

    /// Refresh the elapsed clock
    pub fn refresh(&mut self) {
        self.elapsed = self.started_at.elapsed();
    }

    /// Restart the clock for a fresh game
    pub fn game_started(&mut self) {
        self.started_at = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Record a finished game and its final score
    pub fn game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Elapsed play time as mm:ss
    pub fn clock(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
