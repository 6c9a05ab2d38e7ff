//! Weather Report CLI
//!
//! Fetches hourly weather observations from the Open-Meteo API, stores them
//! in SQLite, and renders spreadsheet and PDF reports.

mod aggregation;
mod api;
mod cli;
mod commands;
mod config;
mod data;
mod models;
mod report;
mod storage;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
