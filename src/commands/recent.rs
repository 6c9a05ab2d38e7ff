//! Recent command - show the newest stored observations.

use std::path::Path;

use anyhow::Result;

use crate::storage::get_recent_observations;


/// Run the recent command.
pub fn run(hours: u32, limit: usize, db_path: &Path) -> Result<()> {
    let rows = get_recent_observations(db_path, hours)?;

    if rows.is_empty() {
        println!("No observations found for the last {hours} hours.");
        println!("Run 'wxr fetch --lat <lat> --lon <lon>' to fetch data first.");
        return Ok(());
    }

    println!(
        "Showing {} of {} records from the last {hours} hours:\n",
        rows.len().min(limit),
        rows.len()
    );
    println!(
        "  {:<20} {:>10} {:>10} {:>12} {:>12}",
        "timestamp", "lat", "lon", "temp (C)", "humidity (%)"
    );
    println!("  {}", "-".repeat(68));

    for row in rows.iter().take(limit) {
        println!(
            "  {:<20} {:>10.4} {:>10.4} {:>12} {:>12}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.latitude,
            row.longitude,
            format_value(row.temperature_2m, 2),
            format_value(row.relative_humidity_2m, 1),
        );
    }

    Ok(())
}


/// Format an optional value, showing a dash when missing.
fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}
