// src/simulation/config.rs

use crate::error::{FreightError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// What happens to a ship's cargo weight when it departs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoPolicy {
    /// Weight is never cleared, so every load after the first departure
    /// sails immediately.
    Retain,
    /// The hold is emptied on every departure.
    ResetOnDeparture,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub ship_count: usize,
    pub customer_count: usize,
    pub cancellation_window: Duration,
    pub departure_threshold: u32,
    pub maintenance_trips: u32,
    pub maintenance_cooldown: Duration,
    pub cancellation_penalty: i64,
    pub revenue_per_order: i64,
    pub revenue_target: i64,
    pub min_order_weight: u32,
    pub max_order_weight: u32,
    pub order_interval: Duration,
    pub cargo_policy: CargoPolicy,
    pub trip_log: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ship_count: 5,
            customer_count: 7,
            cancellation_window: Duration::from_secs(60),
            departure_threshold: 50,
            maintenance_trips: 5,
            maintenance_cooldown: Duration::from_secs(60),
            cancellation_penalty: 250,
            revenue_per_order: 1000,
            revenue_target: 1_000_000,
            min_order_weight: 10,
            max_order_weight: 50,
            order_interval: Duration::from_secs(5),
            cargo_policy: CargoPolicy::Retain,
            trip_log: None,
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by `FREIGHT_*` environment variables, validated.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ships) = env_value(&lookup, "FREIGHT_SHIPS")? {
            config.ship_count = ships;
        }
        if let Some(customers) = env_value(&lookup, "FREIGHT_CUSTOMERS")? {
            config.customer_count = customers;
        }
        if let Some(ms) = env_value(&lookup, "FREIGHT_ORDER_INTERVAL_MS")? {
            config.order_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = env_value(&lookup, "FREIGHT_COOLDOWN_MS")? {
            config.maintenance_cooldown = Duration::from_millis(ms);
        }
        if let Some(ms) = env_value(&lookup, "FREIGHT_CANCEL_WINDOW_MS")? {
            config.cancellation_window = Duration::from_millis(ms);
        }
        if let Some(target) = env_value(&lookup, "FREIGHT_REVENUE_TARGET")? {
            config.revenue_target = target;
        }
        if let Some(reset) = env_value::<bool>(&lookup, "FREIGHT_RESET_CARGO")? {
            config.cargo_policy = if reset {
                CargoPolicy::ResetOnDeparture
            } else {
                CargoPolicy::Retain
            };
        }
        if let Some(path) = lookup("FREIGHT_TRIP_LOG") {
            config.trip_log = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ship_count == 0 {
            return Err(invalid("fleet needs at least one ship"));
        }
        if self.customer_count == 0 {
            return Err(invalid("at least one customer is required"));
        }
        if self.min_order_weight == 0 {
            return Err(invalid("minimum order weight must be positive"));
        }
        if self.min_order_weight > self.max_order_weight {
            return Err(invalid(format!(
                "order weight range {}..={} is empty",
                self.min_order_weight, self.max_order_weight
            )));
        }
        if self.departure_threshold == 0 {
            return Err(invalid("departure threshold must be positive"));
        }
        if self.maintenance_trips == 0 {
            return Err(invalid("maintenance trip threshold must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> FreightError {
    FreightError::InvalidConfig(reason.into())
}

fn env_value<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(format!("{key}={raw:?} is not a valid value"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_operating_constants() {
        let config = SimulationConfig::default();
        assert_eq!(config.ship_count, 5);
        assert_eq!(config.customer_count, 7);
        assert_eq!(config.departure_threshold, 50);
        assert_eq!(config.maintenance_trips, 5);
        assert_eq!(config.cancellation_penalty, 250);
        assert_eq!(config.revenue_target, 1_000_000);
        assert_eq!(config.cargo_policy, CargoPolicy::Retain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_fleet_and_inverted_weights() {
        let no_ships = SimulationConfig {
            ship_count: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            no_ships.validate(),
            Err(FreightError::InvalidConfig(_))
        ));

        let inverted = SimulationConfig {
            min_order_weight: 60,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(FreightError::InvalidConfig(_))
        ));
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn environment_overrides_are_parsed_and_checked() {
        let config = SimulationConfig::from_lookup(lookup_from(&[
            ("FREIGHT_SHIPS", "3"),
            ("FREIGHT_COOLDOWN_MS", "250"),
            ("FREIGHT_RESET_CARGO", "true"),
            ("FREIGHT_TRIP_LOG", "trips.csv"),
        ]))
        .unwrap();
        assert_eq!(config.ship_count, 3);
        assert_eq!(config.maintenance_cooldown, Duration::from_millis(250));
        assert_eq!(config.cargo_policy, CargoPolicy::ResetOnDeparture);
        assert_eq!(config.trip_log, Some(PathBuf::from("trips.csv")));
    }

    #[test]
    fn unparsable_or_invalid_overrides_are_rejected() {
        assert!(matches!(
            SimulationConfig::from_lookup(lookup_from(&[("FREIGHT_SHIPS", "many")])),
            Err(FreightError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::from_lookup(lookup_from(&[("FREIGHT_SHIPS", "0")])),
            Err(FreightError::InvalidConfig(_))
        ));
    }

    #[test]
    fn no_overrides_yields_defaults() {
        let config = SimulationConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.ship_count, 5);
        assert_eq!(config.trip_log, None);
    }
}
