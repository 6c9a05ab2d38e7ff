//! SQLite database operations for weather observation history.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::models::Observation;


/// An observation row read back from the database.
#[derive(Debug, Clone)]
pub struct StoredObservation {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub created_at: String,
}


/// Database summary.
#[derive(Debug, Clone, Default)]
pub struct DatabaseSummary {
    pub total_records: i64,
    pub locations: Vec<(f64, f64)>,
    pub oldest_timestamp: Option<String>,
    pub newest_timestamp: Option<String>,
}


/// Initialize the database with the observation table.
pub fn init_database(db_path: &Path) -> Result<()> {
    // Create parent directory if needed
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    // Append-only observation table. Uniqueness is intentionally not
    // enforced: fetching the same window twice duplicates rows.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS weather_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            temperature_2m REAL,
            relative_humidity_2m REAL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}


/// Append observations to the database.
///
/// Returns the number of rows written.
pub fn store_observations(observations: &[Observation], db_path: &Path) -> Result<usize> {
    if observations.is_empty() {
        return Ok(0);
    }

    init_database(db_path)?;

    let conn = Connection::open(db_path)?;
    let mut stored_count = 0;

    let mut stmt = conn.prepare(
        "INSERT INTO weather_data
            (timestamp, latitude, longitude, temperature_2m, relative_humidity_2m)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for observation in observations {
        stmt.execute(params![
            observation.timestamp_key(),
            observation.latitude,
            observation.longitude,
            observation.temperature_2m,
            observation.relative_humidity_2m,
        ])?;
        stored_count += 1;
    }

    debug!(stored_count, db = %db_path.display(), "Stored observations");

    Ok(stored_count)
}


/// Get observations from the last `hours` hours, newest first.
///
/// The query is capped at 1000 rows.
pub fn get_recent_observations(db_path: &Path, hours: u32) -> Result<Vec<StoredObservation>> {
    if !db_path.exists() {
        return Ok(Vec::new());
    }

    let conn = Connection::open(db_path)?;

    let mut stmt = conn.prepare(
        "SELECT id, timestamp, latitude, longitude, temperature_2m, relative_humidity_2m,
                created_at
         FROM weather_data
         WHERE datetime(timestamp) >= datetime('now', ?1)
         ORDER BY timestamp DESC
         LIMIT 1000",
    )?;

    let window = format!("-{hours} hours");
    let rows = stmt
        .query_map(params![window], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, Option<f64>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?
        .filter_map(|r| r.ok())
        .filter_map(|(id, ts, lat, lon, temp, humidity, created_at)| {
            let timestamp = parse_stored_timestamp(&ts)?;
            Some(StoredObservation {
                id,
                timestamp,
                latitude: lat,
                longitude: lon,
                temperature_2m: temp,
                relative_humidity_2m: humidity,
                created_at,
            })
        })
        .collect();

    Ok(rows)
}


/// Get a summary of the stored data.
pub fn get_database_summary(db_path: &Path) -> Result<DatabaseSummary> {
    if !db_path.exists() {
        return Ok(DatabaseSummary::default());
    }

    let conn = Connection::open(db_path)?;

    let total_records: i64 = conn
        .query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))
        .unwrap_or(0);

    let (oldest_timestamp, newest_timestamp): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM weather_data",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap_or((None, None));

    let mut stmt =
        conn.prepare("SELECT DISTINCT latitude, longitude FROM weather_data LIMIT 10")?;
    let locations = stmt
        .query_map([], |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)))?
        .filter_map(|r| r.ok())
        .collect();

    Ok(DatabaseSummary {
        total_records,
        locations,
        oldest_timestamp,
        newest_timestamp,
    })
}


/// Parse a stored ISO-8601 timestamp, with or without seconds.
fn parse_stored_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}
