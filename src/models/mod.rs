//! Record models for hourly weather observations.

mod observation;

pub use observation::{round_humidity, round_temperature, Observation};
