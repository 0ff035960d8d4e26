//! Fixed-step clock for the terminal loop.
//!
//! Hands out whole milliseconds and advances its baseline by exactly what it
//! handed out, so sub-millisecond remainders and loop overhead carry into the
//! next step instead of being lost.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
    step: Duration,
}

impl TickClock {
    pub fn new(now: Instant, step: Duration) -> Self {
        Self { last: now, step }
    }

    /// Time left until the next step is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.step.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Milliseconds to feed the session, once at least one step has passed.
    pub fn advance(&mut self, now: Instant) -> Option<u32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.step {
            return None;
        }
        let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        self.last += Duration::from_millis(ms as u64);
        Some(ms)
    }
}
