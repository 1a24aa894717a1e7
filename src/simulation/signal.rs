// src/simulation/signal.rs

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// One-shot, process-wide stop broadcast.
///
/// Every suspension point in the system (customer pacing, retry backoff,
/// maintenance cooldown) waits on this signal so a halt ends it early.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    triggered: Mutex<bool>,
    cvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let mut triggered = self.triggered.lock();
        *triggered = true;
        self.cvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self.triggered.lock()
    }

    /// Blocks until the signal fires.
    pub fn wait(&self) {
        let mut triggered = self.triggered.lock();
        while !*triggered {
            self.cvar.wait(&mut triggered);
        }
    }

    /// Sleeps for `timeout` unless the signal fires first.
    /// Returns whether the signal has fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut triggered = self.triggered.lock();
        while !*triggered {
            if self.cvar.wait_until(&mut triggered, deadline).timed_out() {
                break;
            }
        }
        *triggered
    }
}
