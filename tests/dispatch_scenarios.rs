//! End-to-end dispatch scenarios driven one pass at a time.

use freight_dispatch::simulation::clock::{Clock, ManualClock};
use freight_dispatch::strategy::implementations::{FixedBackoff, NoBackoff};
use freight_dispatch::strategy::traits::RetryBackoff;
use freight_dispatch::{
    DispatchStep, FreightError, Location, Order, OrderBook, Ship, SimulationConfig,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn book(
    config: SimulationConfig,
    fleet: Vec<Ship>,
    backoff: Box<dyn RetryBackoff>,
) -> (OrderBook, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let book = OrderBook::with_parts(config, fleet, clock.clone(), backoff);
    (book, clock)
}

fn submit(book: &OrderBook, clock: &ManualClock, weight: u32, origin: Location) {
    let order = Order::outbound(weight, origin, clock.now()).unwrap();
    book.submit(order).unwrap();
}

#[test]
fn five_small_orders_fill_the_ship_and_it_sails() {
    let (book, clock) = book(
        SimulationConfig::default(),
        vec![Ship::new(0, Location::Gotham)],
        Box::new(NoBackoff),
    );

    submit(&book, &clock, 10, Location::Gotham);
    assert_eq!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Loaded {
            ship: 0,
            cargo_weight: 10
        }
    );
    assert_eq!(book.fleet()[0].location, Location::Gotham);

    for _ in 0..4 {
        submit(&book, &clock, 10, Location::Gotham);
    }
    for expected in [20, 30, 40] {
        assert_eq!(
            book.dispatch_next(0).unwrap(),
            DispatchStep::Loaded {
                ship: 0,
                cargo_weight: expected
            }
        );
    }

    assert_eq!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Departed {
            ship: 0,
            destination: Location::Atlanta,
            revenue: 5000,
            maintenance: false
        }
    );

    let fleet = book.fleet();
    let ship = &fleet[0];
    assert_eq!(ship.location, Location::Atlanta);
    assert_eq!(ship.trips_completed, 1);
    assert_eq!(ship.total_orders_carried, 5);
    assert_eq!(book.ledger().total_revenue, 5000);
}

#[test]
fn stranded_order_is_canceled_only_once_a_ship_arrives() {
    let (book, clock) = book(
        SimulationConfig::default(),
        vec![Ship::new(0, Location::Gotham)],
        Box::new(NoBackoff),
    );

    submit(&book, &clock, 20, Location::Atlanta);
    assert!(matches!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Requeued { .. }
    ));

    clock.advance(Duration::from_secs(61));

    // Still no ship in Atlanta: past its deadline but never evaluated
    assert_eq!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Requeued {
            origin: Location::Atlanta,
            attempts: 2
        }
    );
    assert_eq!(book.ledger().total_orders_canceled, 0);

    // A fresh full load takes the ship to Atlanta
    submit(&book, &clock, 50, Location::Gotham);
    assert!(matches!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Requeued { .. }
    ));
    assert!(matches!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Departed {
            destination: Location::Atlanta,
            ..
        }
    ));

    assert!(matches!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Canceled { .. }
    ));

    let ledger = book.ledger();
    assert_eq!(ledger.total_orders_canceled, 1);
    assert_eq!(ledger.total_revenue, 1000 - 250);
    assert_eq!(book.pending_orders(), 0);
    assert_eq!(book.fleet()[0].total_orders_carried, 1);
}

#[test]
fn fifth_trip_sends_ship_to_maintenance_and_pauses_the_worker() {
    let cooldown = Duration::from_millis(150);
    let config = SimulationConfig {
        maintenance_cooldown: cooldown,
        ..SimulationConfig::default()
    };
    let (book, clock) = book(
        config,
        vec![Ship::new(0, Location::Gotham)],
        Box::new(NoBackoff),
    );

    let mut origin = Location::Gotham;
    for _ in 0..4 {
        submit(&book, &clock, 50, origin);
        assert!(matches!(
            book.dispatch_next(0).unwrap(),
            DispatchStep::Departed {
                maintenance: false,
                ..
            }
        ));
        origin = origin.opposite();
    }
    assert_eq!(book.fleet()[0].trips_completed, 4);

    submit(&book, &clock, 50, origin);
    let started = Instant::now();
    let step = book.dispatch_next(0).unwrap();
    let paused = started.elapsed();

    assert!(matches!(
        step,
        DispatchStep::Departed {
            maintenance: true,
            ..
        }
    ));
    assert!(paused >= cooldown, "worker resumed after {paused:?}");
    assert_eq!(book.fleet()[0].trips_completed, 0);
}

#[test]
fn reaching_the_target_stops_every_later_order() {
    let config = SimulationConfig {
        revenue_target: 3000,
        ..SimulationConfig::default()
    };
    let (book, clock) = book(
        config,
        vec![Ship::new(0, Location::Gotham)],
        Box::new(NoBackoff),
    );

    submit(&book, &clock, 50, Location::Gotham);
    submit(&book, &clock, 50, Location::Atlanta);
    submit(&book, &clock, 50, Location::Gotham);

    book.dispatch_next(0).unwrap();
    assert!(!book.is_halted());
    book.dispatch_next(1).unwrap();
    assert!(book.is_halted());
    assert!(book.signal().is_triggered());

    assert!(matches!(book.dispatch_next(2), Err(FreightError::Halted)));
    assert_eq!(book.pending_orders(), 1);

    let summary = book.summary();
    assert_eq!(summary.revenue, 3000);
    assert_eq!(summary.placed, 3);
    assert_eq!(summary.delivered + summary.canceled, summary.placed);
}

#[test]
fn backoff_pause_is_taken_after_requeue() {
    let pause = Duration::from_millis(40);
    let (book, clock) = book(
        SimulationConfig::default(),
        vec![Ship::new(0, Location::Gotham)],
        Box::new(FixedBackoff::new(pause)),
    );
    submit(&book, &clock, 10, Location::Atlanta);

    let started = Instant::now();
    assert!(matches!(
        book.dispatch_next(0).unwrap(),
        DispatchStep::Requeued { attempts: 1, .. }
    ));
    assert!(started.elapsed() >= pause);
    assert_eq!(book.pending_orders(), 1);
}
