//! Typed read helpers for the record store.
//!
//! All functions take a shared `&Connection` and return typed structs,
//! never raw rows. Writes live with the flows that own them
//! ([`crate::ledger`], [`crate::norms`], [`crate::transfer`]).

use rusqlite::{Connection, OptionalExtension, Row, params};
use std::str::FromStr;

use crate::error::Result;
use crate::model::{HistoryAction, HistoryEntry, Norm, ProductionEntry, Worker};

const ENTRY_COLUMNS: &str = "entry_id, worker_id, article, quantity, month, date";
const HISTORY_COLUMNS: &str = "history_id, worker_id, entry_id, article, quantity, action, date";

fn worker_from_row(row: &Row<'_>) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<ProductionEntry> {
    Ok(ProductionEntry {
        id: row.get(0)?,
        worker_id: row.get(1)?,
        article: row.get(2)?,
        quantity: row.get(3)?,
        month: row.get(4)?,
        date: row.get(5)?,
    })
}

fn norm_from_row(row: &Row<'_>) -> rusqlite::Result<Norm> {
    Ok(Norm {
        id: row.get(0)?,
        article: row.get(1)?,
        time: row.get(2)?,
    })
}

fn history_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let action: String = row.get(5)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        worker_id: row.get(1)?,
        entry_id: row.get(2)?,
        article: row.get(3)?,
        quantity: row.get(4)?,
        action: HistoryAction::from_str(&action)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?,
        date: row.get(6)?,
    })
}

/// Fetch one worker by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_worker(conn: &Connection, worker_id: &str) -> Result<Option<Worker>> {
    let worker = conn
        .query_row(
            "SELECT worker_id, name FROM workers WHERE worker_id = ?1",
            [worker_id],
            worker_from_row,
        )
        .optional()?;
    Ok(worker)
}

/// All workers, ordered by name then id for stable listings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_workers(conn: &Connection) -> Result<Vec<Worker>> {
    let mut stmt =
        conn.prepare("SELECT worker_id, name FROM workers ORDER BY name ASC, worker_id ASC")?;
    let workers = stmt
        .query_map([], worker_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(workers)
}

/// Fetch one production entry by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_entry(conn: &Connection, entry_id: &str) -> Result<Option<ProductionEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM production_entries WHERE entry_id = ?1");
    let entry = conn
        .query_row(&sql, [entry_id], entry_from_row)
        .optional()?;
    Ok(entry)
}

/// Look up the unique entry for a `(worker, article, month)` tuple.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_entry(
    conn: &Connection,
    worker_id: &str,
    article: &str,
    month: &str,
) -> Result<Option<ProductionEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM production_entries
         WHERE worker_id = ?1 AND article = ?2 AND month = ?3"
    );
    let entry = conn
        .query_row(&sql, params![worker_id, article, month], entry_from_row)
        .optional()?;
    Ok(entry)
}

/// Every production entry, oldest update first, ids breaking ties.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_entries(conn: &Connection) -> Result<Vec<ProductionEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM production_entries ORDER BY date ASC, entry_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map([], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// One worker's entries, newest update first (ledger screen order).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_entries_for_worker(conn: &Connection, worker_id: &str) -> Result<Vec<ProductionEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM production_entries
         WHERE worker_id = ?1 ORDER BY date DESC, entry_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map([worker_id], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// All entries in one month partition.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_entries_for_month(conn: &Connection, month: &str) -> Result<Vec<ProductionEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM production_entries
         WHERE month = ?1 ORDER BY date ASC, entry_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map([month], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// Fetch one norm by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_norm(conn: &Connection, norm_id: &str) -> Result<Option<Norm>> {
    let norm = conn
        .query_row(
            "SELECT norm_id, article, time_label FROM norms WHERE norm_id = ?1",
            [norm_id],
            norm_from_row,
        )
        .optional()?;
    Ok(norm)
}

/// All norms ordered by article.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_norms(conn: &Connection) -> Result<Vec<Norm>> {
    let mut stmt =
        conn.prepare("SELECT norm_id, article, time_label FROM norms ORDER BY article ASC")?;
    let norms = stmt
        .query_map([], norm_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(norms)
}

/// Exact, case-sensitive article lookup. SQLite TEXT equality is
/// case-sensitive by default, which is precisely the uniqueness rule.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_norm_by_article(conn: &Connection, article: &str) -> Result<Option<Norm>> {
    let norm = conn
        .query_row(
            "SELECT norm_id, article, time_label FROM norms WHERE article = ?1",
            [article],
            norm_from_row,
        )
        .optional()?;
    Ok(norm)
}

/// History rows for one `(entry, worker)` pair, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn history_for_entry(
    conn: &Connection,
    entry_id: &str,
    worker_id: &str,
) -> Result<Vec<HistoryEntry>> {
    let sql = format!(
        "SELECT {HISTORY_COLUMNS} FROM history_entries
         WHERE entry_id = ?1 AND worker_id = ?2
         ORDER BY date ASC, history_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![entry_id, worker_id], history_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Total number of ledger rows. Used by import tests and diagnostics.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_history(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM history_entries", [], |row| row.get(0))?;
    Ok(count)
}
