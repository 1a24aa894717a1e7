// src/strategy/traits.rs

use std::fmt::Debug;
use std::time::Duration;

/// Decides how long a dispatcher pauses after putting an unmatched order
/// back on the queue.
///
/// The requeue itself always happens; a strategy only shapes the spin.
/// The pause is taken with the exclusive section released.
pub trait RetryBackoff: Debug + Send + Sync {
    /// # Arguments
    /// * `attempt` - How many times this order has now been requeued (starts at 1).
    fn pause(&self, attempt: u32) -> Duration;
}
