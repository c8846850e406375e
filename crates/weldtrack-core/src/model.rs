//! Record schemas for the four store collections.
//!
//! Every record carries a string id minted with UUID v4 at creation time.
//! Quantities go through [`parse_quantity`] at every boundary where
//! untrusted input arrives; raw numeric coercion is not allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Label substituted wherever a `worker_id` reference does not resolve.
pub const UNKNOWN_WORKER: &str = "Unknown worker";

/// Mint a fresh record id.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A registered worker. Never deleted in the normal flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
}

/// One production record: how many pieces of one article a worker logged
/// in one calendar month.
///
/// Invariant: at most one entry per `(worker_id, article, month)` tuple.
/// Live adds merge by summing into the existing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub id: String,
    pub worker_id: String,
    pub article: String,
    pub quantity: i64,
    /// Month partition label, e.g. `July 2026`.
    pub month: String,
    /// Timestamp of the last update to this entry.
    pub date: DateTime<Utc>,
}

/// What a history row records about one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Entry inserted for the first time.
    Created,
    /// Quantity added onto an existing entry via the live-add flow.
    Added,
    /// Entry overwritten in place by an explicit edit.
    ///
    /// Files written by the original application used the label `edited`
    /// for this action; it is accepted as an alias on deserialization.
    #[serde(alias = "edited")]
    Modified,
}

impl HistoryAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Added => "added",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = rusqlite::types::FromSqlError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "added" => Ok(Self::Added),
            "modified" | "edited" => Ok(Self::Modified),
            other => Err(rusqlite::types::FromSqlError::Other(
                format!("unknown history action '{other}'").into(),
            )),
        }
    }
}

/// One immutable row of the history ledger.
///
/// `quantity` is always the delta applied by the mutation: the initial
/// quantity for `created`, the increment for `added`, and the signed
/// difference for `modified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub worker_id: String,
    pub entry_id: String,
    pub article: String,
    pub quantity: i64,
    pub action: HistoryAction,
    pub date: DateTime<Utc>,
}

/// A time norm for one article. `article` is unique across the collection,
/// case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Norm {
    pub id: String,
    pub article: String,
    /// Free-text duration label, e.g. `8h`.
    pub time: String,
}

/// Parse a quantity from free-form input.
///
/// Accepts a non-negative whole number, optionally surrounded by
/// whitespace. Anything else is [`Error::InvalidQuantity`] — quantities are
/// never silently coerced to zero.
///
/// # Errors
///
/// Returns [`Error::InvalidQuantity`] for non-numeric, fractional, or
/// negative input.
pub fn parse_quantity(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        _ => Err(Error::InvalidQuantity(raw.to_string())),
    }
}
