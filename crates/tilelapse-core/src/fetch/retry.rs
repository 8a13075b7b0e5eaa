use std::time::Duration;

use crate::consts::{BACKOFF_BASE_SECS, MAX_BACKOFF_EXPONENT};

/// Blocks the calling thread between retry attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration);
}

/// Sleeps the current thread for real.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Exponential backoff: after failed attempt `n` (0-based) wait `2^n` seconds.
///
/// No delay follows the final attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    pub max_retries: u32,
}

impl Backoff {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Total attempts made before giving up. Zero retries still means one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    pub fn delay_for(attempt_index: u32) -> Duration {
        Duration::from_secs(BACKOFF_BASE_SECS.pow(attempt_index.min(MAX_BACKOFF_EXPONENT)))
    }

    /// The full sequence of delays a tile sees when every attempt fails.
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.attempts() - 1).map(Self::delay_for).collect()
    }
}
