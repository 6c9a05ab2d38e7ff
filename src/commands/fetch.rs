//! Fetch command - request hourly weather and store it.

use std::path::Path;

use anyhow::Result;

use crate::api::OpenMeteoClient;
use crate::data::normalize_response;
use crate::storage::store_observations;


/// Run the fetch command.
pub fn run(lat: f64, lon: f64, days: u8, db_path: &Path) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("Invalid latitude {lat} (must be between -90 and 90)");
    }
    if !(-180.0..=180.0).contains(&lon) {
        anyhow::bail!("Invalid longitude {lon} (must be between -180 and 180)");
    }

    println!("Fetching weather for {lat}, {lon}...");

    let client = OpenMeteoClient::with_defaults()?;
    let forecast = client.fetch_hourly(lat, lon, days)?;
    let report = normalize_response(&forecast, lat, lon)?;

    println!(
        "Resolved coordinates: {:.4}, {:.4}",
        report.resolved_latitude, report.resolved_longitude
    );
    if let Some(elevation) = report.elevation {
        println!("Elevation: {elevation} m");
    }
    if let Some(offset) = report.utc_offset_seconds {
        println!("UTC offset: {offset} s");
    }
    if let (Some(start), Some(end)) = (report.range_start, report.range_end) {
        println!(
            "Range: {} to {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        );
    }
    println!(
        "Records: {} total, {} valid",
        report.total_records, report.valid_records
    );

    if report.valid_records == 0 {
        println!("No valid records found (all data contains missing values).");
        return Ok(());
    }

    let stored = store_observations(&report.observations, db_path)?;

    println!("Stored {stored} records in database");
    println!("Database: {}", db_path.display());

    Ok(())
}
