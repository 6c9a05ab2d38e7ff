//! Storage layer for weather observation history.

mod database;

pub use database::{
    get_database_summary,
    get_recent_observations,
    init_database,
    store_observations,
    DatabaseSummary,
    StoredObservation,
};
