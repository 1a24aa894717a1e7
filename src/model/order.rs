// src/model/order.rs

use crate::error::{FreightError, Result};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// The two ports the fleet shuttles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Location {
    Gotham,
    Atlanta,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Gotham, Location::Atlanta];

    pub fn name(self) -> &'static str {
        match self {
            Location::Gotham => "Gotham",
            Location::Atlanta => "Atlanta",
        }
    }

    /// The port on the other side of the route.
    pub fn opposite(self) -> Location {
        match self {
            Location::Gotham => Location::Atlanta,
            Location::Atlanta => Location::Gotham,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pending shipment request. Immutable once placed.
#[derive(Debug, Clone)]
pub struct Order {
    weight: u32,
    origin: Location,
    destination: Location,
    created_at: Instant,
}

impl Order {
    pub fn new(
        weight: u32,
        origin: Location,
        destination: Location,
        created_at: Instant,
    ) -> Result<Self> {
        if weight == 0 {
            return Err(FreightError::EmptyOrder);
        }
        if origin == destination {
            return Err(FreightError::SameEndpoints(origin));
        }

        Ok(Self {
            weight,
            origin,
            destination,
            created_at,
        })
    }

    /// Order from `origin` to the opposite port.
    pub fn outbound(weight: u32, origin: Location, created_at: Instant) -> Result<Self> {
        Self::new(weight, origin, origin.opposite(), created_at)
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    pub fn destination(&self) -> Location {
        self.destination
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// True once the order has waited strictly longer than `window`.
    pub fn is_expired(&self, now: Instant, window: Duration) -> bool {
        self.age(now) > window
    }
}
