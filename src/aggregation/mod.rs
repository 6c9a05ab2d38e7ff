//! Aggregation layer for report statistics.

mod report_stats;

pub use report_stats::{calculate_report_stats, series_stats, ReportStats, SeriesStats};
