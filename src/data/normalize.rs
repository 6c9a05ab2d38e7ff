//! Response-to-record normalization for hourly forecast data.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::api::ForecastResponse;
use crate::models::{round_humidity, round_temperature, Observation};


/// Result of normalizing one forecast response.
///
/// `observations` holds only the complete records (both values present);
/// the counts and range cover every timestamp on the hourly axis.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub observations: Vec<Observation>,
    pub resolved_latitude: f64,
    pub resolved_longitude: f64,
    pub elevation: Option<f64>,
    pub utc_offset_seconds: Option<i64>,
    pub total_records: usize,
    pub valid_records: usize,
    pub range_start: Option<NaiveDateTime>,
    pub range_end: Option<NaiveDateTime>,
}


/// Normalize a forecast response into observation records.
///
/// The hourly time axis is zipped with the two value arrays under an index
/// guard: timestamps beyond the end of either value array are dropped, not
/// padded. Null and non-finite values become `None`. Temperature is rounded
/// to 2 decimals and humidity to 1 decimal. Records missing either value
/// count toward `total_records` but are excluded from `observations`.
pub fn normalize_response(
    response: &ForecastResponse,
    latitude: f64,
    longitude: f64,
) -> anyhow::Result<FetchReport> {
    let hourly = response
        .hourly
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No hourly data in response"))?;

    if hourly.temperature_2m.is_empty() || hourly.relative_humidity_2m.is_empty() {
        anyhow::bail!("No temperature or humidity data received");
    }

    let mut all_timestamps = Vec::new();
    let mut observations = Vec::new();
    let mut total_records = 0usize;

    for (i, raw_timestamp) in hourly.time.iter().enumerate() {
        if i >= hourly.temperature_2m.len() || i >= hourly.relative_humidity_2m.len() {
            break;
        }

        let Some(timestamp) = parse_hourly_timestamp(raw_timestamp) else {
            debug!(value = %raw_timestamp, "Skipping unparseable timestamp");
            continue;
        };

        total_records += 1;
        all_timestamps.push(timestamp);

        let observation = Observation {
            timestamp,
            latitude,
            longitude,
            temperature_2m: clean_value(&hourly.temperature_2m, i).map(round_temperature),
            relative_humidity_2m: clean_value(&hourly.relative_humidity_2m, i)
                .map(round_humidity),
        };

        if observation.is_complete() {
            observations.push(observation);
        }
    }

    let valid_records = observations.len();
    debug!(total_records, valid_records, "Normalized forecast response");

    Ok(FetchReport {
        observations,
        resolved_latitude: response.latitude,
        resolved_longitude: response.longitude,
        elevation: response.elevation,
        utc_offset_seconds: response.utc_offset_seconds,
        total_records,
        valid_records,
        range_start: all_timestamps.first().copied(),
        range_end: all_timestamps.last().copied(),
    })
}


/// Read a value from a parallel array, mapping null and NaN to None.
fn clean_value(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten().filter(|v| v.is_finite())
}


/// Parse an hourly timestamp string ("2024-01-15T10:00", optionally with
/// seconds).
fn parse_hourly_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HourlySeries;

    fn make_response(hourly: HourlySeries) -> ForecastResponse {
        ForecastResponse {
            latitude: 47.36,
            longitude: 8.04,
            elevation: Some(432.0),
            utc_offset_seconds: Some(3600),
            hourly: Some(hourly),
        }
    }

    #[test]
    fn test_normalize_complete_rows() {
        let response = make_response(HourlySeries {
            time: vec![
                "2024-01-15T00:00".to_string(),
                "2024-01-15T01:00".to_string(),
            ],
            temperature_2m: vec![Some(1.456), Some(2.0)],
            relative_humidity_2m: vec![Some(88.04), Some(90.0)],
        });

        let report = normalize_response(&response, 47.37, 8.0).unwrap();
        assert_eq!(report.total_records, 2);
        assert_eq!(report.valid_records, 2);
        assert_eq!(report.observations[0].temperature_2m, Some(1.46));
        assert_eq!(report.observations[0].relative_humidity_2m, Some(88.0));
        assert_eq!(report.observations[0].latitude, 47.37);
        assert_eq!(report.observations[0].longitude, 8.0);
    }

    #[test]
    fn test_null_values_excluded_from_valid() {
        let response = make_response(HourlySeries {
            time: vec![
                "2024-01-15T00:00".to_string(),
                "2024-01-15T01:00".to_string(),
                "2024-01-15T02:00".to_string(),
            ],
            temperature_2m: vec![Some(1.0), None, Some(3.0)],
            relative_humidity_2m: vec![Some(80.0), Some(81.0), None],
        });

        let report = normalize_response(&response, 47.37, 8.0).unwrap();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.valid_records, 1);
        assert_eq!(report.observations[0].timestamp_key(), "2024-01-15T00:00:00");
    }

    #[test]
    fn test_nan_treated_as_missing() {
        let response = make_response(HourlySeries {
            time: vec!["2024-01-15T00:00".to_string()],
            temperature_2m: vec![Some(f64::NAN)],
            relative_humidity_2m: vec![Some(80.0)],
        });

        let report = normalize_response(&response, 47.37, 8.0).unwrap();
        assert_eq!(report.total_records, 1);
        assert_eq!(report.valid_records, 0);
    }

    #[test]
    fn test_short_value_arrays_truncate_time_axis() {
        let response = make_response(HourlySeries {
            time: vec![
                "2024-01-15T00:00".to_string(),
                "2024-01-15T01:00".to_string(),
                "2024-01-15T02:00".to_string(),
            ],
            temperature_2m: vec![Some(1.0), Some(2.0)],
            relative_humidity_2m: vec![Some(80.0), Some(81.0), Some(82.0)],
        });

        let report = normalize_response(&response, 47.37, 8.0).unwrap();
        assert_eq!(report.total_records, 2);
        assert_eq!(report.valid_records, 2);
        assert_eq!(
            report.range_end.unwrap().format("%H:%M").to_string(),
            "01:00"
        );
    }

    #[test]
    fn test_missing_hourly_block_is_error() {
        let response = ForecastResponse {
            latitude: 47.36,
            longitude: 8.04,
            elevation: None,
            utc_offset_seconds: None,
            hourly: None,
        };

        assert!(normalize_response(&response, 47.37, 8.0).is_err());
    }

    #[test]
    fn test_empty_value_arrays_is_error() {
        let response = make_response(HourlySeries {
            time: vec!["2024-01-15T00:00".to_string()],
            temperature_2m: vec![],
            relative_humidity_2m: vec![],
        });

        assert!(normalize_response(&response, 47.37, 8.0).is_err());
    }

    #[test]
    fn test_all_missing_is_not_an_error() {
        let response = make_response(HourlySeries {
            time: vec!["2024-01-15T00:00".to_string()],
            temperature_2m: vec![None],
            relative_humidity_2m: vec![None],
        });

        let report = normalize_response(&response, 47.37, 8.0).unwrap();
        assert_eq!(report.total_records, 1);
        assert_eq!(report.valid_records, 0);
        assert!(report.observations.is_empty());
    }
}
