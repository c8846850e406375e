//! `wt init` — create the record store.

use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use weldtrack_core::db;

#[derive(Args, Debug)]
pub struct InitArgs {}

#[derive(Debug, Serialize)]
struct InitReport {
    db: String,
    schema_version: u32,
}

pub fn run_init(_args: &InitArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;
    let report = InitReport {
        db: db_path.display().to_string(),
        schema_version: db::migrations::current_schema_version(&conn)?,
    };
    render(output, &report, |r, w| {
        writeln!(w, "Record store ready at {} (schema v{})", r.db, r.schema_version)
    })
}
