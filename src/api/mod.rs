//! HTTP client layer for the Open-Meteo weather API.

mod open_meteo;

pub use open_meteo::{
    ApiConfig,
    ApiError,
    ForecastResponse,
    HourlySeries,
    OpenMeteoClient,
};
