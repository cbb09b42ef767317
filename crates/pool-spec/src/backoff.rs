//! # Fibonacci Backoff
//!
//! Progressive backoff between pool registry lookups that failed transiently.
//! The sequence grows like Fibonacci numbers, which is gentler than
//! exponential backoff for the handful of attempts name generation makes.
//!
//! Sequence with the defaults: 100ms, 100ms, 200ms, 300ms, 500ms, 800ms, ...
//! capped at the maximum, each value jittered by 0.5x to 1.5x.

use rand::Rng;
use std::time::Duration;

/// Fibonacci backoff calculator
///
/// Each backoff is the sum of the previous two backoffs, capped at `max`.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    /// Previous backoff value in milliseconds
    prev_millis: u64,
    /// Current backoff value in milliseconds
    current_millis: u64,
    /// Maximum backoff value in milliseconds
    max_millis: u64,
}

impl FibonacciBackoff {
    /// Create a new Fibonacci backoff between `min` and `max`
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        let min_millis = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
        let max_millis = u64::try_from(max.as_millis()).unwrap_or(u64::MAX).max(min_millis);
        Self {
            prev_millis: 0,
            current_millis: min_millis,
            max_millis,
        }
    }

    /// Get the next un-jittered backoff in milliseconds and advance the sequence
    pub fn next_backoff_millis(&mut self) -> u64 {
        let result = self.current_millis;

        let next = self.prev_millis.saturating_add(self.current_millis);
        self.prev_millis = self.current_millis;
        self.current_millis = std::cmp::min(next, self.max_millis);

        result
    }

    /// Get the next backoff with 0.5x to 1.5x jitter and advance the sequence
    pub fn next_jittered(&mut self) -> Duration {
        let base = self.next_backoff_millis();
        let jitter: f64 = rand::thread_rng().gen_range(0.5..1.5);
        Duration::from_secs_f64(Duration::from_millis(base).as_secs_f64() * jitter)
    }
}
