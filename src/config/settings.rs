//! Application settings and path constants.

use std::path::PathBuf;


/// Default report window in hours.
pub const DEFAULT_REPORT_HOURS: u32 = 48;

/// Largest accepted report window in hours (one week).
pub const MAX_REPORT_HOURS: u32 = 168;

/// Number of past days covered by a fetch, ending today.
pub const DEFAULT_PAST_DAYS: u8 = 2;


/// Get the default database path.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".weather-report")
        .join("observations.db")
}


/// Get the Open-Meteo API base URL, honoring an environment override.
pub fn api_base_url() -> String {
    std::env::var("OPEN_METEO_BASE_URL")
        .unwrap_or_else(|_| "https://api.open-meteo.com/v1".to_string())
}
