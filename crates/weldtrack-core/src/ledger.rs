//! Record mutation protocol and the append-only history ledger.
//!
//! Every mutation of a production entry appends exactly one ledger row in
//! the same transaction, so the store and the ledger cannot drift apart.
//! Ledger rows record the delta applied by the mutation: the initial
//! quantity for `created`, the increment for `added`, and the signed
//! difference for `modified`.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::db::query;
use crate::error::{Error, Result};
use crate::model::{HistoryAction, HistoryEntry, ProductionEntry, Worker, new_id};
use crate::month::month_label;

/// Register a new worker under a fresh id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn register_worker(conn: &Connection, name: &str) -> Result<Worker> {
    let worker = Worker {
        id: new_id(),
        name: name.trim().to_string(),
    };
    insert_worker(conn, &worker)?;
    debug!(worker = %worker.id, "registered worker");
    Ok(worker)
}

pub(crate) fn insert_worker(conn: &Connection, worker: &Worker) -> Result<()> {
    conn.execute(
        "INSERT INTO workers (worker_id, name) VALUES (?1, ?2)",
        params![worker.id, worker.name],
    )?;
    Ok(())
}

pub(crate) fn insert_entry(conn: &Connection, entry: &ProductionEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO production_entries
            (entry_id, worker_id, article, quantity, month, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.id,
            entry.worker_id,
            entry.article,
            entry.quantity,
            entry.month,
            entry.date
        ],
    )?;
    Ok(())
}

pub(crate) fn update_entry(
    conn: &Connection,
    entry_id: &str,
    article: &str,
    quantity: i64,
    date: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "UPDATE production_entries
         SET article = ?2, quantity = ?3, date = ?4
         WHERE entry_id = ?1",
        params![entry_id, article, quantity, date],
    )?;
    Ok(())
}

/// Append one immutable row to the history ledger. The ledger exposes no
/// update or delete.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_history(
    conn: &Connection,
    worker_id: &str,
    entry_id: &str,
    article: &str,
    quantity: i64,
    action: HistoryAction,
    date: DateTime<Utc>,
) -> Result<HistoryEntry> {
    let row = HistoryEntry {
        id: new_id(),
        worker_id: worker_id.to_string(),
        entry_id: entry_id.to_string(),
        article: article.to_string(),
        quantity,
        action,
        date,
    };
    conn.execute(
        "INSERT INTO history_entries
            (history_id, worker_id, entry_id, article, quantity, action, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.id,
            row.worker_id,
            row.entry_id,
            row.article,
            row.quantity,
            row.action.as_str(),
            row.date
        ],
    )?;
    Ok(row)
}

/// Live-add flow: log `quantity` pieces of `article` for a worker in the
/// current calendar month of `now`.
///
/// An existing `(worker, article, month)` entry is merged by summing; a
/// missing one is created. Either way exactly one ledger row is appended,
/// inside the same transaction as the entry write.
///
/// # Errors
///
/// Returns [`Error::WorkerNotFound`] for an unknown worker,
/// [`Error::InvalidQuantity`] for a negative quantity, and storage errors
/// otherwise.
pub fn add_production(
    conn: &mut Connection,
    worker_id: &str,
    article: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> Result<ProductionEntry> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity(quantity.to_string()));
    }
    let article = article.trim();
    if query::get_worker(conn, worker_id)?.is_none() {
        return Err(Error::WorkerNotFound(worker_id.to_string()));
    }

    let month = month_label(now);
    let tx = conn.transaction()?;
    let entry = match query::find_entry(&tx, worker_id, article, &month)? {
        Some(existing) => {
            let merged = ProductionEntry {
                quantity: existing.quantity + quantity,
                date: now,
                ..existing
            };
            update_entry(&tx, &merged.id, &merged.article, merged.quantity, merged.date)?;
            append_history(
                &tx,
                worker_id,
                &merged.id,
                article,
                quantity,
                HistoryAction::Added,
                now,
            )?;
            merged
        }
        None => {
            let entry = ProductionEntry {
                id: new_id(),
                worker_id: worker_id.to_string(),
                article: article.to_string(),
                quantity,
                month,
                date: now,
            };
            insert_entry(&tx, &entry)?;
            append_history(
                &tx,
                worker_id,
                &entry.id,
                article,
                quantity,
                HistoryAction::Created,
                now,
            )?;
            entry
        }
    };
    tx.commit()?;

    debug!(entry = %entry.id, quantity, "production logged");
    Ok(entry)
}

/// Edit flow: full overwrite of an entry's article and quantity.
///
/// Unlike [`add_production`] this replaces the stored quantity instead of
/// summing. The ledger row records the signed quantity difference under
/// the `modified` action.
///
/// # Errors
///
/// Returns [`Error::EntryNotFound`] for an unknown entry,
/// [`Error::InvalidQuantity`] for a negative quantity, and storage errors
/// otherwise.
pub fn overwrite_entry(
    conn: &mut Connection,
    entry_id: &str,
    article: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> Result<ProductionEntry> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity(quantity.to_string()));
    }
    let article = article.trim();

    let tx = conn.transaction()?;
    let existing = query::get_entry(&tx, entry_id)?
        .ok_or_else(|| Error::EntryNotFound(entry_id.to_string()))?;

    let delta = quantity - existing.quantity;
    update_entry(&tx, entry_id, article, quantity, now)?;
    append_history(
        &tx,
        &existing.worker_id,
        entry_id,
        article,
        delta,
        HistoryAction::Modified,
        now,
    )?;
    tx.commit()?;

    debug!(entry = %entry_id, quantity, delta, "entry overwritten");
    Ok(ProductionEntry {
        article: article.to_string(),
        quantity,
        date: now,
        ..existing
    })
}

#[cfg(test)]
mod tests {
    use super::{add_production, overwrite_entry, register_worker};
    use crate::db::{open_memory, query};
    use crate::error::Error;
    use crate::model::HistoryAction;
    use chrono::{TimeZone, Utc};

    fn july(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn first_add_creates_entry_and_created_history() {
        let mut conn = open_memory().expect("open store");
        let worker = register_worker(&conn, "Petrov").expect("register");

        let entry = add_production(&mut conn, &worker.id, "AB-1", 5, july(1, 9)).expect("add");
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.month, "July 2026");

        let history = query::history_for_entry(&conn, &entry.id, &worker.id).expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, HistoryAction::Created);
        assert_eq!(history[0].quantity, 5);
    }

    #[test]
    fn re_add_sums_quantity_and_appends_one_added_row() {
        let mut conn = open_memory().expect("open store");
        let worker = register_worker(&conn, "Petrov").expect("register");

        let first = add_production(&mut conn, &worker.id, "AB-1", 5, july(1, 9)).expect("add");
        let second = add_production(&mut conn, &worker.id, "AB-1", 3, july(2, 10)).expect("re-add");

        assert_eq!(second.id, first.id, "same (worker, article, month) must merge");
        assert_eq!(second.quantity, 8);

        let history = query::history_for_entry(&conn, &first.id, &worker.id).expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, HistoryAction::Added);
        assert_eq!(history[1].quantity, 3, "ledger records the delta, not the total");
    }

    #[test]
    fn different_months_partition_into_separate_entries() {
        let mut conn = open_memory().expect("open store");
        let worker = register_worker(&conn, "Petrov").expect("register");

        let in_july = add_production(&mut conn, &worker.id, "AB-1", 5, july(30, 9)).expect("add");
        let in_august = add_production(
            &mut conn,
            &worker.id,
            "AB-1",
            2,
            Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).single().expect("valid"),
        )
        .expect("add next month");

        assert_ne!(in_july.id, in_august.id);
        assert_eq!(in_august.quantity, 2);
    }

    #[test]
    fn overwrite_replaces_quantity_and_records_signed_delta() {
        let mut conn = open_memory().expect("open store");
        let worker = register_worker(&conn, "Petrov").expect("register");
        let entry = add_production(&mut conn, &worker.id, "AB-1", 10, july(1, 9)).expect("add");

        let edited = overwrite_entry(&mut conn, &entry.id, "AB-2", 4, july(3, 15)).expect("edit");
        assert_eq!(edited.article, "AB-2");
        assert_eq!(edited.quantity, 4, "edit overwrites, it does not sum");

        let history = query::history_for_entry(&conn, &entry.id, &worker.id).expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, HistoryAction::Modified);
        assert_eq!(history[1].quantity, -6);
    }

    #[test]
    fn unknown_worker_is_a_typed_error() {
        let mut conn = open_memory().expect("open store");
        let err = add_production(&mut conn, "missing", "AB-1", 1, july(1, 9)).unwrap_err();
        assert!(matches!(err, Error::WorkerNotFound(_)));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut conn = open_memory().expect("open store");
        let worker = register_worker(&conn, "Petrov").expect("register");
        let err = add_production(&mut conn, &worker.id, "AB-1", -1, july(1, 9)).unwrap_err();
        assert!(matches!(err, Error::InvalidQuantity(_)));
    }

    #[test]
    fn failed_overwrite_leaves_no_history() {
        let mut conn = open_memory().expect("open store");
        let err = overwrite_entry(&mut conn, "missing", "AB-1", 1, july(1, 9)).unwrap_err();
        assert!(matches!(err, Error::EntryNotFound(_)));
        assert_eq!(query::count_history(&conn).expect("count"), 0);
    }
}
