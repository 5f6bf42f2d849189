//! Fixed-period tick source for the game loop

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Drives `GameEngine::tick` at a fixed period.
///
/// Used from a single `select!` loop, so ticks never overlap. A stopped
/// scheduler's [`tick`](TickScheduler::tick) never resolves.
pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
}

impl TickScheduler {
    /// Create a stopped scheduler
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    /// Start (or restart) ticking; the first tick fires one period from now
    pub fn start(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        // A slow frame should not cause a burst of catch-up ticks
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_new_scheduler_is_stopped() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(200));
        assert!(!scheduler.is_running());

        let waited = timeout(Duration::from_secs(5), scheduler.tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let period = Duration::from_millis(200);
        let mut scheduler = TickScheduler::new(period);
        scheduler.start();

        let started = Instant::now();
        scheduler.tick().await;
        assert!(started.elapsed() >= period);

        let second = Instant::now();
        scheduler.tick().await;
        assert!(second.elapsed() >= period);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(50));
        scheduler.start();
        scheduler.tick().await;

        scheduler.stop();
        assert!(!scheduler.is_running());
        let waited = timeout(Duration::from_secs(1), scheduler.tick()).await;
        assert!(waited.is_err());

        scheduler.start();
        assert!(scheduler.is_running());
        let waited = timeout(Duration::from_secs(1), scheduler.tick()).await;
        assert!(waited.is_ok());
    }
}
