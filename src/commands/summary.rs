//! Summary command - show stored data totals.

use std::path::Path;

use anyhow::Result;

use crate::storage::get_database_summary;


/// Run the summary command.
pub fn run(db_path: &Path) -> Result<()> {
    let summary = get_database_summary(db_path)?;

    println!("\n{}", "=".repeat(60));
    println!("{:^60}", "Weather Data Summary");
    println!("{}\n", "=".repeat(60));

    println!("  Total Records:       {:>15}", summary.total_records);
    println!("  Unique Locations:    {:>15}", summary.locations.len());

    if let (Some(oldest), Some(newest)) =
        (&summary.oldest_timestamp, &summary.newest_timestamp)
    {
        println!("  Date Range:          {oldest} to {newest}");
    }

    if !summary.locations.is_empty() {
        println!("\nLOCATIONS");
        println!("{}", "-".repeat(40));
        for (lat, lon) in &summary.locations {
            println!("  {lat:>10.4}, {lon:>10.4}");
        }
    }

    if summary.total_records == 0 {
        println!("  No data stored yet. Run 'wxr fetch' to start collecting.");
    }

    println!("\nDatabase: {}", db_path.display());

    Ok(())
}
