// src/model/ship.rs

use crate::model::order::Location;
use serde::Serialize;

/// The state of a single vessel in the fleet.
///
/// Ships carry no lock of their own. Every mutation happens while the
/// dispatcher holds the order book's exclusive section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    // Identity (position in the roster)
    pub id: usize,

    // Cargo state
    pub cargo_weight: u32,
    pub location: Location,

    // Counters
    pub trips_completed: u32,      // Reset by maintenance
    pub total_orders_carried: u32, // Cumulative, never reset
}

impl Ship {
    pub fn new(id: usize, location: Location) -> Self {
        Self {
            id,
            cargo_weight: 0,
            location,
            trips_completed: 0,
            total_orders_carried: 0,
        }
    }

    pub fn is_docked_at(&self, location: Location) -> bool {
        self.location == location
    }

    /// Takes an order's cargo aboard. No capacity limit is enforced.
    pub fn load_cargo(&mut self, weight: u32) {
        self.cargo_weight = self.cargo_weight.saturating_add(weight);
        self.total_orders_carried += 1;
    }

    /// Clears the hold.
    pub fn depart_and_reset(&mut self) {
        self.cargo_weight = 0;
    }

    /// Moves the ship to `destination` and counts the trip.
    pub fn sail_to(&mut self, destination: Location) {
        self.location = destination;
        self.trips_completed += 1;
    }

    pub fn enter_maintenance(&mut self) {
        self.trips_completed = 0;
    }
}

/// Builds the startup roster, alternating home ports starting at Gotham.
pub fn standard_fleet(ship_count: usize) -> Vec<Ship> {
    (0..ship_count)
        .map(|id| Ship::new(id, Location::ALL[id % Location::ALL.len()]))
        .collect()
}
