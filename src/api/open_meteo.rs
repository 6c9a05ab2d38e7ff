//! Synchronous client for the Open-Meteo forecast API.

use std::time::Duration as StdDuration;

use chrono::{Duration, Local};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;


/// Weather API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}


/// Weather API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Open-Meteo API base URL
    pub base_url: String,

    /// Connection timeout in seconds
    pub timeout_secs: u64,
}


impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::api_base_url(),
            timeout_secs: 30,
        }
    }
}


/// Hourly time series from the forecast response.
///
/// `time` is the hourly axis; the value arrays run parallel to it but are
/// not guaranteed to have the same length, and individual entries may be
/// null.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
}


/// Forecast response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub utc_offset_seconds: Option<i64>,
    pub hourly: Option<HourlySeries>,
}


/// Open-Meteo HTTP client.
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}


impl OpenMeteoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration.
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(ApiConfig::default())
    }

    /// Validate coordinates.
    pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ApiError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Fetch hourly temperature and humidity covering the past `days` days
    /// through today.
    pub fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<ForecastResponse, ApiError> {
        Self::validate_coordinates(latitude, longitude)?;

        let end_date = Local::now().date_naive();
        let start_date = end_date - Duration::days(i64::from(days));

        let url = self.build_forecast_url(
            latitude,
            longitude,
            &start_date.format("%Y-%m-%d").to_string(),
            &end_date.format("%Y-%m-%d").to_string(),
        );

        debug!(url = %url, "Fetching hourly weather");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(ApiError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ApiError::RequestFailed(format!("HTTP {status}")));
        }

        let forecast: ForecastResponse = response
            .json()
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        debug!(
            lat = forecast.latitude,
            lon = forecast.longitude,
            points = forecast.hourly.as_ref().map(|h| h.time.len()).unwrap_or(0),
            "Forecast response received"
        );

        Ok(forecast)
    }

    /// Build the API URL for an hourly forecast request.
    fn build_forecast_url(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
    ) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m,relative_humidity_2m\
             &start_date={}&end_date={}&timezone=auto",
            self.config.base_url, latitude, longitude, start_date, end_date
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(47.37, 8.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(-91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, 181.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_build_forecast_url() {
        let client = OpenMeteoClient::with_defaults().unwrap();

        let url = client.build_forecast_url(47.37, 8.0, "2024-01-13", "2024-01-15");
        assert!(url.contains("latitude=47.37"));
        assert!(url.contains("longitude=8"));
        assert!(url.contains("hourly=temperature_2m,relative_humidity_2m"));
        assert!(url.contains("start_date=2024-01-13"));
        assert!(url.contains("end_date=2024-01-15"));
        assert!(url.contains("timezone=auto"));
    }

    #[test]
    fn test_parse_forecast_response() {
        let json = r#"{
            "latitude": 47.36,
            "longitude": 8.04,
            "elevation": 432.0,
            "utc_offset_seconds": 3600,
            "hourly": {
                "time": ["2024-01-15T00:00", "2024-01-15T01:00"],
                "temperature_2m": [1.4, null],
                "relative_humidity_2m": [88.0, 90.0]
            }
        }"#;

        let forecast: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.elevation, Some(432.0));
        assert_eq!(forecast.utc_offset_seconds, Some(3600));

        let hourly = forecast.hourly.unwrap();
        assert_eq!(hourly.time.len(), 2);
        assert_eq!(hourly.temperature_2m, vec![Some(1.4), None]);
        assert_eq!(hourly.relative_humidity_2m, vec![Some(88.0), Some(90.0)]);
    }

    #[test]
    fn test_parse_forecast_response_without_hourly() {
        let json = r#"{"latitude": 47.36, "longitude": 8.04}"#;

        let forecast: ForecastResponse = serde_json::from_str(json).unwrap();
        assert!(forecast.hourly.is_none());
        assert!(forecast.elevation.is_none());
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));

        let err = ApiError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));
    }
}
