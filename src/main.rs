use freight_dispatch::io::reporting;
use freight_dispatch::simulation::config::SimulationConfig;
use freight_dispatch::simulation::customer::Customer;
use freight_dispatch::simulation::engine::OrderBook;
use freight_dispatch::simulation::shipper::Shipper;
use std::process;
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Logs go to stderr; stdout carries only the final accounting
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 1. SETUP CONFIGURATION
    let config = match SimulationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(%e, "refusing to start");
            process::exit(1);
        }
    };

    let book = Arc::new(OrderBook::new(config.clone()));
    info!(
        ships = config.ship_count,
        customers = config.customer_count,
        revenue_target = config.revenue_target,
        "freight operations starting"
    );

    // 2. START SHIPPERS (one per ship)
    let mut workers = Vec::new();
    for id in 0..config.ship_count {
        let shipper = Shipper::new(id, Arc::clone(&book));
        workers.push(thread::spawn(move || shipper.run()));
    }

    // 3. START CUSTOMERS
    for id in 0..config.customer_count {
        let mut customer = match Customer::new(id, &config) {
            Ok(customer) => customer,
            Err(e) => {
                error!(%e, customer = id, "could not create customer");
                book.halt();
                break;
            }
        };
        let book = Arc::clone(&book);
        workers.push(thread::spawn(move || {
            if let Err(e) = customer.run(&book) {
                error!(%e, customer = id, "customer stopped");
            }
        }));
    }

    // 4. WAIT FOR THE REVENUE TARGET
    book.signal().wait();
    for handle in workers {
        if handle.join().is_err() {
            warn!("worker thread panicked during shutdown");
        }
    }

    // 5. REPORT
    let summary = book.summary();
    println!("Total orders delivered: {}", summary.delivered);
    println!("Total orders canceled: {}", summary.canceled);

    if let Some(path) = &config.trip_log {
        if let Err(e) = reporting::write_trip_log(path, &book.trip_log()) {
            error!(%e, "could not write trip log");
        }
    }
}
