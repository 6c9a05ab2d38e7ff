//! CLI command implementations.

pub mod export;
pub mod fetch;
pub mod recent;
pub mod summary;
