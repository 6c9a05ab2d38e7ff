//! Configuration and settings for the weather report CLI.

mod settings;

pub use settings::{
    api_base_url,
    default_db_path,
    DEFAULT_PAST_DAYS,
    DEFAULT_REPORT_HOURS,
    MAX_REPORT_HOURS,
};
