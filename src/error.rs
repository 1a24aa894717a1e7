// src/error.rs

use crate::model::order::Location;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FreightError {
    #[error("order weight must be positive")]
    EmptyOrder,

    #[error("order cannot ship from {0} to itself")]
    SameEndpoints(Location),

    #[error("operations halted after reaching the revenue target")]
    Halted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("trip log export failed: {0}")]
    Report(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FreightError>;
