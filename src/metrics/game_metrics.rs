use std::time::{Duration, Instant};

/// Per-session play statistics, kept in memory only
pub struct GameMetrics {
    /// Set while the clock is running
    running_since: Option<Instant>,
    /// Play time banked before the last pause
    banked: Duration,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: Some(Instant::now()),
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            games_played: 0,
            last_score: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or_default();
    }

    pub fn on_game_start(&mut self) {
        self.running_since = Some(Instant::now());
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    /// Freeze the clock; the game is over or paused
    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.update();
    }

    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn is_clock_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.pause();
        self.games_played += 1;
        self.last_score = Some(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
