// src/simulation/engine.rs

use crate::error::{FreightError, Result};
use crate::model::ledger::{LedgerSummary, OperationsLedger};
use crate::model::order::{Location, Order};
use crate::model::ship::{standard_fleet, Ship};
use crate::simulation::clock::{Clock, SystemClock};
use crate::simulation::config::{CargoPolicy, SimulationConfig};
use crate::simulation::signal::ShutdownSignal;
use crate::strategy::implementations::NoBackoff;
use crate::strategy::traits::RetryBackoff;
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One departure, as written to the trip log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    pub trip: u64,
    pub worker: usize,
    pub ship: usize,
    pub from: Location,
    pub to: Location,
    pub orders_carried: u32,
    pub cargo_weight: u32,
    pub revenue_earned: i64,
    pub ledger_revenue: i64,
}

/// What a single pass of the dispatch loop did with the order it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStep {
    /// No ship at the order's origin; the order went back to the tail.
    Requeued { origin: Location, attempts: u32 },
    /// A ship was available but the order had outlived the window.
    Canceled { age: Duration },
    /// Cargo loaded; the ship keeps waiting at the dock.
    Loaded { ship: usize, cargo_weight: u32 },
    /// Cargo loaded and the ship sailed.
    Departed {
        ship: usize,
        destination: Location,
        revenue: i64,
        maintenance: bool,
    },
}

#[derive(Debug)]
struct PendingOrder {
    order: Order,
    requeues: u32,
}

/// Everything guarded by the single exclusive section.
#[derive(Debug)]
struct Operations {
    pending: VecDeque<PendingOrder>,
    fleet: Vec<Ship>,
    ledger: OperationsLedger,
    trips: Vec<TripRecord>,
    halted: bool,
}

/// The shared order queue, fleet roster and ledger, plus the matching loop
/// every shipper runs against them.
///
/// Queue, fleet and ledger sit behind one mutex so that
/// match -> load -> depart -> account is atomic. Only the wait for a new
/// order, retry pauses and maintenance cooldowns happen outside it.
#[derive(Debug)]
pub struct OrderBook {
    config: SimulationConfig,
    state: Mutex<Operations>,
    order_ready: Condvar,
    signal: Arc<ShutdownSignal>,
    clock: Arc<dyn Clock>,
    backoff: Box<dyn RetryBackoff>,
}

impl OrderBook {
    /// Standard fleet, wall clock and busy retry.
    pub fn new(config: SimulationConfig) -> Self {
        let fleet = standard_fleet(config.ship_count);
        Self::with_parts(config, fleet, Arc::new(SystemClock), Box::new(NoBackoff))
    }

    pub fn with_parts(
        config: SimulationConfig,
        fleet: Vec<Ship>,
        clock: Arc<dyn Clock>,
        backoff: Box<dyn RetryBackoff>,
    ) -> Self {
        Self {
            config,
            state: Mutex::new(Operations {
                pending: VecDeque::new(),
                fleet,
                ledger: OperationsLedger::new(),
                trips: Vec::new(),
                halted: false,
            }),
            order_ready: Condvar::new(),
            signal: Arc::new(ShutdownSignal::new()),
            clock,
            backoff,
        }
    }

    /// Appends an order to the queue and counts it as placed.
    pub fn submit(&self, order: Order) -> Result<()> {
        let mut state = self.state.lock();
        if state.halted {
            return Err(FreightError::Halted);
        }

        let (weight, origin, destination) = (order.weight(), order.origin(), order.destination());
        state.pending.push_back(PendingOrder { order, requeues: 0 });
        state.ledger.record_order_placed();
        drop(state);

        debug!(weight, %origin, %destination, "order placed");
        self.order_ready.notify_one();
        Ok(())
    }

    /// Runs dispatch passes until operations halt.
    pub fn run_dispatch_loop(&self, worker: usize) -> Result<()> {
        loop {
            self.dispatch_next(worker)?;
        }
    }

    /// One pass of the dispatch loop: take the oldest order and try to put
    /// it on a ship docked at its origin.
    ///
    /// Blocks while the queue is empty. Returns `Halted` once the revenue
    /// target has been reached by any worker.
    pub fn dispatch_next(&self, worker: usize) -> Result<DispatchStep> {
        let mut state = self.state.lock();
        let mut pending = loop {
            if state.halted {
                return Err(FreightError::Halted);
            }
            if let Some(pending) = state.pending.pop_front() {
                break pending;
            }
            self.order_ready.wait(&mut state);
        };

        let origin = pending.order.origin();
        // Roster order, first match wins
        let Some(index) = state.fleet.iter().position(|ship| ship.is_docked_at(origin)) else {
            pending.requeues = pending.requeues.saturating_add(1);
            let attempts = pending.requeues;
            state.pending.push_back(pending);
            drop(state);

            debug!(worker, %origin, attempts, "no ship docked, order requeued");
            let pause = self.backoff.pause(attempts);
            if !pause.is_zero() && self.signal.wait_timeout(pause) {
                return Err(FreightError::Halted);
            }
            return Ok(DispatchStep::Requeued { origin, attempts });
        };

        let order = pending.order;
        let now = self.clock.now();
        if order.is_expired(now, self.config.cancellation_window) {
            state
                .ledger
                .record_cancellation(self.config.cancellation_penalty);
            let age = order.age(now);
            warn!(
                worker,
                %origin,
                age_secs = age.as_secs(),
                "order expired before pickup, canceled"
            );
            return Ok(DispatchStep::Canceled { age });
        }

        let Operations {
            fleet,
            ledger,
            trips,
            halted,
            ..
        } = &mut *state;
        let ship = &mut fleet[index];
        ship.load_cargo(order.weight());

        if ship.cargo_weight < self.config.departure_threshold {
            debug!(
                worker,
                ship = ship.id,
                cargo = ship.cargo_weight,
                "cargo loaded, waiting for more"
            );
            return Ok(DispatchStep::Loaded {
                ship: ship.id,
                cargo_weight: ship.cargo_weight,
            });
        }

        // Revenue scales with everything the ship has ever carried
        let revenue = self.config.revenue_per_order * i64::from(ship.total_orders_carried);
        let departed_weight = ship.cargo_weight;
        let destination = order.destination();
        ship.sail_to(destination);
        if self.config.cargo_policy == CargoPolicy::ResetOnDeparture {
            ship.depart_and_reset();
        }
        ledger.record_revenue(revenue);

        let trip = trips.len() as u64 + 1;
        trips.push(TripRecord {
            trip,
            worker,
            ship: ship.id,
            from: origin,
            to: destination,
            orders_carried: ship.total_orders_carried,
            cargo_weight: departed_weight,
            revenue_earned: revenue,
            ledger_revenue: ledger.total_revenue,
        });

        let maintenance = ship.trips_completed >= self.config.maintenance_trips;
        if maintenance {
            ship.enter_maintenance();
        }

        let ship_id = ship.id;
        let total_revenue = ledger.total_revenue;
        let target_reached = ledger.target_reached(self.config.revenue_target);
        if target_reached {
            *halted = true;
        }
        drop(state);

        info!(
            worker,
            ship = ship_id,
            from = %origin,
            to = %destination,
            revenue,
            total_revenue,
            "ship departed"
        );

        if target_reached {
            info!(total_revenue, "revenue target reached, halting operations");
            self.broadcast_halt();
        } else if maintenance {
            info!(
                worker,
                ship = ship_id,
                cooldown_secs = self.config.maintenance_cooldown.as_secs_f64(),
                "ship entering maintenance"
            );
            self.signal.wait_timeout(self.config.maintenance_cooldown);
        }

        Ok(DispatchStep::Departed {
            ship: ship_id,
            destination,
            revenue,
            maintenance,
        })
    }

    /// Stops all dispatching and order intake.
    pub fn halt(&self) {
        self.state.lock().halted = true;
        self.broadcast_halt();
    }

    fn broadcast_halt(&self) {
        self.signal.trigger();
        // Waiters re-check `halted` under the lock, so no wakeup is lost
        self.order_ready.notify_all();
    }

    pub fn is_halted(&self) -> bool {
        self.state.lock().halted
    }

    pub fn signal(&self) -> &ShutdownSignal {
        &self.signal
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn now(&self) -> std::time::Instant {
        self.clock.now()
    }

    pub fn pending_orders(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn ledger(&self) -> OperationsLedger {
        self.state.lock().ledger.clone()
    }

    pub fn fleet(&self) -> Vec<Ship> {
        self.state.lock().fleet.clone()
    }

    pub fn trip_log(&self) -> Vec<TripRecord> {
        self.state.lock().trips.clone()
    }

    pub fn summary(&self) -> LedgerSummary {
        self.state.lock().ledger.summary()
    }
}
