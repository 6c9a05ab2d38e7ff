//! Observation model for hourly weather data.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};


/// A single hourly weather observation for a coordinate pair.
///
/// Timestamps are local wall-clock time as reported by the API
/// (`timezone=auto`) and are persisted as ISO-8601 text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
}


impl Observation {
    /// Get the timestamp as ISO-8601 text for storage.
    pub fn timestamp_key(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Check whether both measured values are present.
    ///
    /// Only complete observations are persisted; partial rows are counted
    /// but dropped during normalization.
    pub fn is_complete(&self) -> bool {
        self.temperature_2m.is_some() && self.relative_humidity_2m.is_some()
    }
}


/// Round a temperature value to 2 decimal places.
pub fn round_temperature(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


/// Round a humidity value to 1 decimal place.
pub fn round_humidity(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
