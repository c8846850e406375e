//! JSON import and export of monthly production data.
//!
//! The wire shape is the one the original field tool produced, one object
//! per production entry of the exported month:
//!
//! ```json
//! {
//!   "workerId": "…",
//!   "welderName": "Petrov",
//!   "article": "AB-1",
//!   "quantity": 8,
//!   "month": "July 2026",
//!   "date": "2026-07-14T09:30:00Z",
//!   "history": [{ "quantity": 5, "action": "created", "date": "…" }]
//! }
//! ```
//!
//! Import reconciles record by record, each inside its own transaction:
//! a malformed record fails alone and the loop continues, while records
//! committed before a failure stay committed. Only a top-level parse
//! failure aborts before any write. Note the asymmetry with the live-add
//! flow: import REPLACES an existing entry's quantity where live adds sum
//! onto it. That mirrors the original tool and is kept deliberately.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::db::query;
use crate::error::{Error, Result};
use crate::ledger;
use crate::model::{
    HistoryAction, ProductionEntry, UNKNOWN_WORKER, Worker, new_id,
};
use crate::month::month_label;

/// One history item inside an export record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferHistoryItem {
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    pub action: HistoryAction,
    pub date: DateTime<Utc>,
}

/// One export record: a production entry with its resolved worker name
/// and full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub worker_id: String,
    /// Resolved worker name. Optional on import; files from older tools
    /// sometimes omit it.
    #[serde(default)]
    pub welder_name: Option<String>,
    pub article: String,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    pub month: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<TransferHistoryItem>,
}

/// Outcome of one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub records: usize,
    pub workers_created: usize,
    pub entries_created: usize,
    pub entries_updated: usize,
    pub history_appended: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// True when every record applied cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A record that failed to apply; everything it wrote was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// Zero-based position in the imported array.
    pub index: usize,
    pub message: String,
}

/// Quantities in files written by the original tool are sometimes numbers
/// and sometimes numeric strings. Accept both; reject everything else
/// instead of coercing to zero.
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Number(i64),
        Text(String),
    }

    match RawQuantity::deserialize(deserializer)? {
        RawQuantity::Number(value) => Ok(value),
        RawQuantity::Text(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid quantity '{raw}'"))),
    }
}

/// Conventional export filename for a month label.
#[must_use]
pub fn export_file_name(month: &str) -> String {
    format!("welder-data-{month}.json")
}

/// Export every production entry of the current calendar month of `now`,
/// with resolved worker names and full history.
///
/// # Errors
///
/// Returns an error if a store read fails.
pub fn export_month(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<TransferRecord>> {
    let month = month_label(now);
    let entries = query::list_entries_for_month(conn, &month)?;
    let workers = query::list_workers(conn)?;

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = workers
            .iter()
            .find(|w| w.id == entry.worker_id)
            .map_or(UNKNOWN_WORKER, |w| w.name.as_str());
        let history = query::history_for_entry(conn, &entry.id, &entry.worker_id)?
            .into_iter()
            .map(|row| TransferHistoryItem {
                quantity: row.quantity,
                action: row.action,
                date: row.date,
            })
            .collect();
        records.push(TransferRecord {
            worker_id: entry.worker_id,
            welder_name: Some(name.to_string()),
            article: entry.article,
            quantity: entry.quantity,
            month: entry.month,
            date: entry.date,
            history,
        });
    }
    debug!(month, records = records.len(), "export assembled");
    Ok(records)
}

/// Reconcile an exported dataset into the store.
///
/// The top level must parse as a JSON array; anything else is
/// [`Error::ImportFormat`] and nothing is written. Each record then
/// applies inside its own transaction: unresolved workers are created,
/// the `(worker, article, month)` entry is overwritten or inserted, and
/// every nested history item is appended against the resulting entry id.
///
/// # Errors
///
/// Returns [`Error::ImportFormat`] for malformed top-level input. Failures
/// of individual records are collected in the report, not raised.
pub fn import(conn: &mut Connection, data: &str) -> Result<ImportReport> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(data).map_err(|e| Error::ImportFormat(e.to_string()))?;

    let mut report = ImportReport {
        records: values.len(),
        ..ImportReport::default()
    };

    for (index, value) in values.into_iter().enumerate() {
        match apply_record(conn, value) {
            Ok(outcome) => {
                report.workers_created += usize::from(outcome.worker_created);
                report.entries_created += usize::from(outcome.entry_created);
                report.entries_updated += usize::from(!outcome.entry_created);
                report.history_appended += outcome.history_appended;
            }
            Err(error) => {
                warn!(index, %error, "import record failed; continuing");
                report.failures.push(ImportFailure {
                    index,
                    message: error.to_string(),
                });
            }
        }
    }

    debug!(
        records = report.records,
        failures = report.failures.len(),
        "import finished"
    );
    Ok(report)
}

struct RecordOutcome {
    worker_created: bool,
    entry_created: bool,
    history_appended: usize,
}

/// Apply one record as a unit of work. Any failure rolls back everything
/// the record wrote, including a worker created earlier in the same
/// transaction.
fn apply_record(conn: &mut Connection, value: serde_json::Value) -> Result<RecordOutcome> {
    let record: TransferRecord =
        serde_json::from_value(value).map_err(|e| Error::ImportFormat(e.to_string()))?;
    if record.quantity < 0 {
        return Err(Error::InvalidQuantity(record.quantity.to_string()));
    }

    let tx = conn.transaction()?;

    let worker_created = if query::get_worker(&tx, &record.worker_id)?.is_none() {
        let name = record
            .welder_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_WORKER);
        ledger::insert_worker(
            &tx,
            &Worker {
                id: record.worker_id.clone(),
                name: name.to_string(),
            },
        )?;
        true
    } else {
        false
    };

    let (entry_id, entry_created) =
        match query::find_entry(&tx, &record.worker_id, &record.article, &record.month)? {
            Some(existing) => {
                // Replace, not merge-sum: the import side of the
                // asymmetric merge policy.
                ledger::update_entry(
                    &tx,
                    &existing.id,
                    &existing.article,
                    record.quantity,
                    record.date,
                )?;
                (existing.id, false)
            }
            None => {
                let entry = ProductionEntry {
                    id: new_id(),
                    worker_id: record.worker_id.clone(),
                    article: record.article.clone(),
                    quantity: record.quantity,
                    month: record.month.clone(),
                    date: record.date,
                };
                ledger::insert_entry(&tx, &entry)?;
                (entry.id, true)
            }
        };

    for item in &record.history {
        ledger::append_history(
            &tx,
            &record.worker_id,
            &entry_id,
            &record.article,
            item.quantity,
            item.action,
            item.date,
        )?;
    }

    tx.commit()?;
    Ok(RecordOutcome {
        worker_created,
        entry_created,
        history_appended: record.history.len(),
    })
}
