//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Resolve the startup connection string into one of those modes.
//! - Create the schema before returning a usable connection.
//!
//! # Invariants
//! - Returned connections always have the `todos` table.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Connection string that selects a private in-memory store.
pub const IN_MEMORY_STORE: &str = ":memory:";

const SCHEMA: &str = include_str!("schema.sql");

/// Opens the store named by a startup connection string.
///
/// `":memory:"` selects an in-memory store; anything else is treated as a
/// SQLite file path, created on first open.
pub fn open_store(connection_string: &str) -> DbResult<Connection> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return Err(DbError::EmptyConnectionString);
    }
    if trimmed == IN_MEMORY_STORE {
        return open_db_in_memory();
    }
    open_db(trimmed)
}

/// Opens a SQLite database file, creating the schema if missing.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database with the schema in place.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    opener: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match opener() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = bootstrap_connection(&conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    // Schema statements are all IF NOT EXISTS.
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
