pub mod clock;
pub mod config;
pub mod customer;
pub mod engine;
pub mod shipper;
pub mod signal;
