// src/model/ledger.rs

use serde::Serialize;

/// Company-wide accounting. Lives inside the order book's exclusive section
/// alongside the fleet, so it has no lock of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationsLedger {
    pub total_revenue: i64, // Goes negative under cancellation penalties
    pub total_orders_placed: u64,
    pub total_orders_canceled: u64,
}

/// Final accounting reported at shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub delivered: u64,
    pub canceled: u64,
    pub placed: u64,
    pub revenue: i64,
}

impl OperationsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_order_placed(&mut self) {
        self.total_orders_placed += 1;
    }

    pub fn record_cancellation(&mut self, penalty: i64) {
        self.total_orders_canceled += 1;
        self.total_revenue -= penalty;
    }

    pub fn record_revenue(&mut self, amount: i64) {
        self.total_revenue += amount;
    }

    /// Orders placed minus orders canceled. Orders still waiting in the
    /// queue count as delivered.
    pub fn delivered(&self) -> u64 {
        self.total_orders_placed
            .saturating_sub(self.total_orders_canceled)
    }

    pub fn target_reached(&self, target: i64) -> bool {
        self.total_revenue >= target
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            delivered: self.delivered(),
            canceled: self.total_orders_canceled,
            placed: self.total_orders_placed,
            revenue: self.total_revenue,
        }
    }
}
