// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::TripRecord;
use std::path::Path;
use tracing::info;

/// Writes the trip log to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g., "results/trips.csv").
/// * `trips` - Departures in the order they happened.
pub fn write_trip_log(file_path: &Path, trips: &[TripRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(file_path)?;

    for record in trips {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush().map_err(csv::Error::from)?;

    info!(
        rows = trips.len(),
        path = %file_path.display(),
        "trip log exported"
    );
    Ok(())
}
