//! Export commands for spreadsheet and PDF reports.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::report::{open_file, write_excel_report, write_pdf_report};
use crate::storage::{get_recent_observations, StoredObservation};


/// Run the Excel export command.
pub fn run_excel(
    hours: u32,
    output: Option<String>,
    should_open: bool,
    db_path: &Path,
) -> Result<()> {
    let rows = load_report_window(db_path, hours)?;
    let output_path = resolve_output_path(output, "weather_data", "xlsx");

    println!("Generating Excel report for the last {hours} hours...");
    write_excel_report(&rows, &output_path)?;

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    if should_open {
        open_file(&output_path)?;
    }

    Ok(())
}


/// Run the PDF export command.
pub fn run_pdf(
    hours: u32,
    output: Option<String>,
    should_open: bool,
    db_path: &Path,
) -> Result<()> {
    let rows = load_report_window(db_path, hours)?;
    let output_path = resolve_output_path(output, "weather_report", "pdf");

    println!("Generating PDF report for the last {hours} hours...");
    write_pdf_report(&rows, hours, &output_path)?;

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    if should_open {
        open_file(&output_path)?;
    }

    Ok(())
}


/// Load the report window, erroring when it is empty.
fn load_report_window(db_path: &Path, hours: u32) -> Result<Vec<StoredObservation>> {
    let rows = get_recent_observations(db_path, hours)?;

    if rows.is_empty() {
        anyhow::bail!(
            "No weather data available for the last {hours} hours. Run 'wxr fetch' first."
        );
    }

    Ok(rows)
}


/// Resolve the output path, defaulting to a timestamped file name in the
/// current directory.
fn resolve_output_path(output: Option<String>, stem: &str, extension: &str) -> PathBuf {
    match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!(
            "{stem}_{}.{extension}",
            Local::now().format("%Y%m%d_%H%M%S")
        )),
    }
}
