//! Normalization layer turning API responses into observation records.

mod normalize;

pub use normalize::{normalize_response, FetchReport};
