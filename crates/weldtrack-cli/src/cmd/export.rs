//! `wt export` — write the current month's entries to a JSON file.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use weldtrack_core::{db, month, transfer};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output path; defaults to welder-data-<month>.json in the working
    /// directory.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    path: String,
    month: String,
    records: usize,
}

pub fn run_export(args: &ExportArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;
    let now = Utc::now();
    let label = month::month_label(now);

    let records = transfer::export_month(&conn, now)?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(transfer::export_file_name(&label)));

    let json = serde_json::to_string_pretty(&records)?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write export file {}", path.display()))?;

    let summary = ExportSummary {
        path: path.display().to_string(),
        month: label,
        records: records.len(),
    };
    render(output, &summary, |s, w| {
        writeln!(w, "Exported {} record(s) for {} to {}", s.records, s.month, s.path)
    })
}
