//! XLSX report writer.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use crate::storage::StoredObservation;


const HEADER_COLOR: u32 = 0x366092;

const COLUMNS: [(&str, f64); 3] = [
    ("timestamp", 20.0),
    ("temperature_2m", 16.0),
    ("relative_humidity_2m", 22.0),
];


/// Write the report window to an XLSX workbook.
///
/// One "Weather Data" sheet with a styled header row, sorted ascending by
/// timestamp. Missing values leave the cell blank.
pub fn write_excel_report(rows: &[StoredObservation], output_path: &Path) -> Result<()> {
    let mut sorted: Vec<&StoredObservation> = rows.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Weather Data")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_align(FormatAlign::Center);
    let temperature_format = Format::new().set_num_format("0.00");
    let humidity_format = Format::new().set_num_format("0.0");

    for (col, (name, width)) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (i, observation) in sorted.iter().enumerate() {
        let row = (i + 1) as u32;

        worksheet.write_string(
            row,
            0,
            observation.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        )?;

        if let Some(temp) = observation.temperature_2m {
            worksheet.write_number_with_format(row, 1, temp, &temperature_format)?;
        }
        if let Some(humidity) = observation.relative_humidity_2m {
            worksheet.write_number_with_format(row, 2, humidity, &humidity_format)?;
        }
    }

    workbook
        .save(output_path)
        .with_context(|| format!("Failed to write XLSX to {}", output_path.display()))?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_row(hour: u32) -> StoredObservation {
        StoredObservation {
            id: hour as i64,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            latitude: 47.37,
            longitude: 8.0,
            temperature_2m: Some(12.34),
            relative_humidity_2m: Some(65.4),
            created_at: "2024-01-15 10:05:00".to_string(),
        }
    }

    #[test]
    fn test_write_excel_report() {
        let tmp_dir = TempDir::new().unwrap();
        let output_path = tmp_dir.path().join("report.xlsx");

        let rows = vec![create_test_row(2), create_test_row(0), create_test_row(1)];
        write_excel_report(&rows, &output_path).unwrap();

        let metadata = std::fs::metadata(&output_path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_excel_report_with_missing_values() {
        let tmp_dir = TempDir::new().unwrap();
        let output_path = tmp_dir.path().join("report.xlsx");

        let mut row = create_test_row(0);
        row.temperature_2m = None;

        write_excel_report(&[row], &output_path).unwrap();
        assert!(output_path.exists());
    }
}
