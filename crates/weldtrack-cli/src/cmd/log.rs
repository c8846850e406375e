//! `wt log` — the live-add flow for production entries.

use crate::output::{OutputMode, render};
use chrono::Utc;
use clap::Args;
use std::path::Path;
use weldtrack_core::{db, ledger, model};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Worker id the pieces belong to.
    #[arg(long, value_name = "ID")]
    pub worker: String,

    /// Article code.
    #[arg(long)]
    pub article: String,

    /// Pieces produced. Added onto an existing entry for the same article
    /// and month.
    #[arg(long, value_name = "N")]
    pub quantity: String,
}

pub fn run_log(args: &LogArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let quantity = model::parse_quantity(&args.quantity)?;
    let mut conn = db::open_store(db_path)?;

    let entry = ledger::add_production(&mut conn, &args.worker, &args.article, quantity, Utc::now())?;
    render(output, &entry, |e, w| {
        writeln!(
            w,
            "{}: {} now at {} pcs in {} (entry {})",
            args.worker, e.article, e.quantity, e.month, e.id
        )
    })
}
