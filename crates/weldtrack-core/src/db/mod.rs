//! SQLite record store.
//!
//! Runtime defaults are intentionally conservative:
//! - `journal_mode = WAL` so a reader never blocks the single writer
//! - `busy_timeout = 5s` to ride out transient locks from a second process
//! - `synchronous = NORMAL`, which is durable enough for WAL

pub mod migrations;
pub mod query;
pub mod schema;

use rusqlite::Connection;
use std::{path::Path, time::Duration};

use crate::error::Result;

/// Busy timeout applied to every store connection.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (or create) the record store, apply runtime pragmas, and migrate
/// the schema to the latest version.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or if
/// opening, configuring, or migrating the database fails.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::migrate(&mut conn)?;
    tracing::debug!(path = %path.display(), "record store opened");
    Ok(conn)
}

/// Open a fully migrated in-memory store. Used by tests and dry runs.
///
/// # Errors
///
/// Returns an error if configuring or migrating the database fails.
pub fn open_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    configure_connection(&conn)?;
    migrations::migrate(&mut conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    let _journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}
