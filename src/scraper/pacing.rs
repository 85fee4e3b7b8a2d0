// src/scraper/pacing.rs

use rand::Rng;
use std::time::Duration;

/// The only place a run deliberately waits. Swapped for a recorder in tests.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Randomized spacing between consecutive listings, `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingWindow {
    pub min: Duration,
    pub max: Duration,
}

impl PacingWindow {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn draw(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        if max <= min {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for PacingWindow {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(5))
    }
}
