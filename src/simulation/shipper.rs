// src/simulation/shipper.rs

use crate::error::FreightError;
use crate::simulation::engine::OrderBook;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{info, warn};

/// Worker that keeps one dispatch loop running against the shared book.
pub struct Shipper {
    id: usize,
    book: Arc<OrderBook>,
}

impl Shipper {
    pub fn new(id: usize, book: Arc<OrderBook>) -> Self {
        Self { id, book }
    }

    /// Runs until operations halt. A loop that dies for any other reason,
    /// including a panic, is restarted.
    pub fn run(&self) {
        loop {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| self.book.run_dispatch_loop(self.id)));

            match outcome {
                Ok(Err(FreightError::Halted)) | Ok(Ok(())) => break,
                Ok(Err(err)) => warn!(worker = self.id, %err, "dispatch loop failed, restarting"),
                Err(_) => warn!(worker = self.id, "dispatch loop panicked, restarting"),
            }

            if self.book.is_halted() {
                break;
            }
        }
        info!(worker = self.id, "shipper stopped");
    }
}
