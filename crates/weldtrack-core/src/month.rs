//! Month partition labels.
//!
//! Entries are partitioned by a textual `"%B %Y"` label (`July 2026`).
//! The label is the storage key; calendar ordering is recovered by parsing
//! it back, with unparseable labels sorting after everything else.

use chrono::{DateTime, Month, Utc};
use std::cmp::Ordering;

/// Month label for a timestamp, e.g. `July 2026`.
#[must_use]
pub fn month_label(date: DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

/// Parse a month label back into `(year, month)`.
#[must_use]
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let (name, year) = label.trim().rsplit_once(' ')?;
    let month = name.trim().parse::<Month>().ok()?;
    let year = year.trim().parse::<i32>().ok()?;
    Some((year, month.number_from_month()))
}

/// Descending calendar order for month labels (newest first); labels that
/// do not parse sort last, then fall back to reverse lexical order so the
/// result stays deterministic.
#[must_use]
pub fn cmp_labels_desc(a: &str, b: &str) -> Ordering {
    match (parse_month_label(a), parse_month_label(b)) {
        (Some(ka), Some(kb)) => kb.cmp(&ka),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}
