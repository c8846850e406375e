//! `wt import` — reconcile a previously exported JSON file.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use weldtrack_core::{db, transfer};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file produced by `wt export` (or the original field tool).
    pub file: PathBuf,
}

pub fn run_import(args: &ImportArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let data = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read import file {}", args.file.display()))?;

    let mut conn = db::open_store(db_path)?;
    let report = transfer::import(&mut conn, &data)?;

    render(output, &report, |r, w| {
        writeln!(
            w,
            "Imported {} record(s): {} worker(s) created, {} entr(ies) created, \
             {} updated, {} history row(s)",
            r.records - r.failures.len(),
            r.workers_created,
            r.entries_created,
            r.entries_updated,
            r.history_appended
        )?;
        for failure in &r.failures {
            writeln!(w, "  record {} failed: {}", failure.index, failure.message)?;
        }
        Ok(())
    })
}
