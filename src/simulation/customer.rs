// src/simulation/customer.rs

use crate::error::{FreightError, Result};
use crate::model::order::{Location, Order};
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::OrderBook;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::time::Instant;
use tracing::debug;

/// Places random orders at a steady pace until operations halt.
///
/// Weight is uniform over the configured range; the origin is a fair coin
/// between the two ports and the destination is the other one.
#[derive(Debug)]
pub struct Customer {
    id: usize,
    rng: StdRng,
    weights: Uniform<u32>,
}

impl Customer {
    pub fn new(id: usize, config: &SimulationConfig) -> Result<Self> {
        Self::with_rng(id, config, StdRng::from_entropy())
    }

    /// Reproducible order stream, for tests.
    pub fn seeded(id: usize, config: &SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(id, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: usize, config: &SimulationConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id,
            rng,
            weights: Uniform::new_inclusive(config.min_order_weight, config.max_order_weight),
        })
    }

    pub fn next_order(&mut self, now: Instant) -> Result<Order> {
        let weight = self.weights.sample(&mut self.rng);
        let origin = if self.rng.gen_bool(0.5) {
            Location::Gotham
        } else {
            Location::Atlanta
        };
        Order::outbound(weight, origin, now)
    }

    /// Submits an order every `order_interval` until the book halts.
    pub fn run(&mut self, book: &OrderBook) -> Result<()> {
        let interval = book.config().order_interval;
        loop {
            let order = self.next_order(book.now())?;
            debug!(
                customer = self.id,
                weight = order.weight(),
                origin = %order.origin(),
                "submitting order"
            );
            match book.submit(order) {
                Ok(()) => {}
                Err(FreightError::Halted) => return Ok(()),
                Err(err) => return Err(err),
            }

            if book.signal().wait_timeout(interval) {
                return Ok(());
            }
        }
    }
}
