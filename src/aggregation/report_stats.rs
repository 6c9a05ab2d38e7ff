//! Statistical aggregation over a report window.

use crate::storage::StoredObservation;


/// Summary statistics for one measured series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStats {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}


/// Statistics for both series in a report window.
///
/// A series with no present values yields `None` instead of NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStats {
    pub temperature: Option<SeriesStats>,
    pub humidity: Option<SeriesStats>,
}


/// Calculate avg/max/min over the present values of a series.
pub fn series_stats<I>(values: I) -> Option<SeriesStats>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut count = 0usize;

    for value in values.into_iter().flatten() {
        sum += value;
        max = max.max(value);
        min = min.min(value);
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(SeriesStats {
        avg: sum / count as f64,
        max,
        min,
        count,
    })
}


/// Calculate report statistics for a window of stored observations.
pub fn calculate_report_stats(rows: &[StoredObservation]) -> ReportStats {
    ReportStats {
        temperature: series_stats(rows.iter().map(|r| r.temperature_2m)),
        humidity: series_stats(rows.iter().map(|r| r.relative_humidity_2m)),
    }
}
