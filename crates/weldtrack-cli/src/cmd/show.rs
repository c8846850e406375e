//! `wt show` — one worker's ledger, grouped by month.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use std::path::Path;
use weldtrack_core::model::{ProductionEntry, Worker};
use weldtrack_core::{db, month};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Worker id.
    pub worker: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkerLedger {
    worker: Worker,
    /// Months newest first; entries newest first within a month.
    months: Vec<MonthEntries>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthEntries {
    month: String,
    entries: Vec<ProductionEntry>,
}

fn group_by_month(entries: Vec<ProductionEntry>) -> Vec<MonthEntries> {
    let mut months: Vec<MonthEntries> = Vec::new();
    for entry in entries {
        match months.iter_mut().find(|m| m.month == entry.month) {
            Some(group) => group.entries.push(entry),
            None => months.push(MonthEntries {
                month: entry.month.clone(),
                entries: vec![entry],
            }),
        }
    }
    months.sort_by(|a, b| month::cmp_labels_desc(&a.month, &b.month));
    months
}

pub fn run_show(args: &ShowArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;
    let worker = db::query::get_worker(&conn, &args.worker)?
        .with_context(|| format!("worker '{}' not found", args.worker))?;
    // Entries come back newest first, so each month group keeps that order.
    let entries = db::query::list_entries_for_worker(&conn, &worker.id)?;

    let ledger = WorkerLedger {
        worker,
        months: group_by_month(entries),
    };
    render(output, &ledger, |l, w| {
        writeln!(w, "{}", l.worker.name)?;
        for month in &l.months {
            writeln!(w, "\n{}", month.month)?;
            for entry in &month.entries {
                writeln!(w, "  {}  {} pcs  ({})", entry.article, entry.quantity, entry.id)?;
            }
        }
        Ok(())
    })
}
