//! `wt history` — the change ledger of one entry, newest first.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use std::path::Path;
use weldtrack_core::db;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Entry id.
    pub entry: String,
}

pub fn run_history(args: &HistoryArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;
    let entry = db::query::get_entry(&conn, &args.entry)?
        .with_context(|| format!("production entry '{}' not found", args.entry))?;

    let mut rows = db::query::history_for_entry(&conn, &entry.id, &entry.worker_id)?;
    rows.reverse();

    render(output, &rows, |rows, w| {
        writeln!(w, "History of {} ({})", entry.article, entry.month)?;
        if rows.is_empty() {
            writeln!(w, "  no recorded changes")?;
        }
        for row in rows {
            writeln!(
                w,
                "  {}  {}  {:+} pcs",
                row.date.format("%Y-%m-%d %H:%M"),
                row.action,
                row.quantity
            )?;
        }
        Ok(())
    })
}
