//! Trend charts for the PDF report.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::storage::StoredObservation;


/// Render stacked temperature and humidity trend charts as an SVG string.
///
/// Rows may arrive in any order; the series are sorted by timestamp and
/// rows with a missing value are skipped per series.
pub fn render_trend_svg(
    rows: &[StoredObservation],
    width: u32,
    height: u32,
) -> Result<String> {
    let mut sorted: Vec<&StoredObservation> = rows.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let temperature: Vec<(NaiveDateTime, f64)> = sorted
        .iter()
        .filter_map(|r| r.temperature_2m.map(|v| (r.timestamp, v)))
        .collect();
    let humidity: Vec<(NaiveDateTime, f64)> = sorted
        .iter()
        .filter_map(|r| r.relative_humidity_2m.map(|v| (r.timestamp, v)))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((2, 1));
        draw_series_panel(&panels[0], &temperature, "Temperature (°C)", &RED)?;
        draw_series_panel(&panels[1], &humidity, "Relative Humidity (%)", &BLUE)?;

        root.present()?;
    }

    Ok(svg)
}


/// Draw one series as a line chart with point markers.
fn draw_series_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    data: &[(NaiveDateTime, f64)],
    label: &str,
    color: &RGBColor,
) -> Result<()> {
    if data.is_empty() {
        area.draw(&Text::new(
            format!("{label}: no data"),
            (10, 10),
            ("sans-serif", 14),
        ))?;
        return Ok(());
    }

    let (min_dt, max_dt) = data
        .iter()
        .fold((data[0].0, data[0].0), |(min, max), (dt, _)| {
            (min.min(*dt), max.max(*dt))
        });
    // A single data point would give an empty axis range
    let max_dt = if min_dt == max_dt {
        max_dt + Duration::hours(1)
    } else {
        max_dt
    };

    let (min_val, max_val) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (_, v)| {
            (min.min(*v), max.max(*v))
        });
    let padding = if (max_val - min_val).abs() > 1e-6 {
        (max_val - min_val) * 0.1
    } else {
        1.0
    };

    let mut chart = ChartBuilder::on(area)
        .caption(label, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            RangedDateTime::from(min_dt..max_dt),
            (min_val - padding)..(max_val + padding),
        )?;

    chart
        .configure_mesh()
        .y_desc(label)
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%m/%d %H:%M").to_string())
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(LineSeries::new(data.iter().copied(), color.stroke_width(2)))?;
    chart.draw_series(
        data.iter()
            .map(|(dt, v)| Circle::new((*dt, *v), 2, color.filled())),
    )?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_row(hour: u32, temp: Option<f64>, humidity: Option<f64>) -> StoredObservation {
        StoredObservation {
            id: hour as i64,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            latitude: 47.37,
            longitude: 8.0,
            temperature_2m: temp,
            relative_humidity_2m: humidity,
            created_at: "2024-01-15 10:05:00".to_string(),
        }
    }

    #[test]
    fn test_render_trend_svg() {
        let rows = vec![
            create_test_row(0, Some(1.0), Some(80.0)),
            create_test_row(1, Some(2.0), Some(85.0)),
            create_test_row(2, Some(1.5), Some(82.0)),
        ];

        let svg = render_trend_svg(&rows, 900, 700).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Temperature"));
        assert!(svg.contains("Humidity"));
    }

    #[test]
    fn test_render_single_point() {
        let rows = vec![create_test_row(0, Some(1.0), Some(80.0))];

        let svg = render_trend_svg(&rows, 900, 700).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_series_without_values() {
        let rows = vec![
            create_test_row(0, None, Some(80.0)),
            create_test_row(1, None, Some(85.0)),
        ];

        let svg = render_trend_svg(&rows, 900, 700).unwrap();
        assert!(svg.contains("no data"));
    }
}
