//! Two-port freight dispatch: customers place orders, shippers match them to
//! ships docked at the order's origin, and operations stop once revenue
//! reaches the target.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{FreightError, Result};
pub use model::ledger::{LedgerSummary, OperationsLedger};
pub use model::order::{Location, Order};
pub use model::ship::Ship;
pub use simulation::config::{CargoPolicy, SimulationConfig};
pub use simulation::engine::{DispatchStep, OrderBook, TripRecord};
