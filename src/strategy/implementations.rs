// src/strategy/implementations.rs

use crate::strategy::traits::RetryBackoff;
use std::time::Duration;

// =========================================================================
// 1. No Backoff (Busy Retry)
// =========================================================================

/// Requeue and immediately try the next order. This is the stock behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackoff;

impl RetryBackoff for NoBackoff {
    fn pause(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

// =========================================================================
// 2. Fixed Backoff
// =========================================================================

/// Same pause after every requeue.
#[derive(Debug, Clone, Copy)]
pub struct FixedBackoff {
    delay: Duration,
}

impl FixedBackoff {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl RetryBackoff for FixedBackoff {
    fn pause(&self, _attempt: u32) -> Duration {
        self.delay
    }
}

// =========================================================================
// 3. Exponential Backoff
// =========================================================================

/// Doubles the pause for every further requeue of the same order, up to `max`.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    base: Duration,
    max: Duration,
}

impl ExponentialBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }
}

impl RetryBackoff for ExponentialBackoff {
    fn pause(&self, attempt: u32) -> Duration {
        // Shift is clamped so the multiplier cannot overflow
        let shift = attempt.saturating_sub(1).min(31);
        self.base
            .checked_mul(1u32 << shift)
            .map_or(self.max, |delay| delay.min(self.max))
    }
}
