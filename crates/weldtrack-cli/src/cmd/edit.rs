//! `wt edit` — overwrite an entry in place.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use chrono::Utc;
use clap::Args;
use std::path::Path;
use weldtrack_core::{db, ledger, model};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Entry id to overwrite.
    pub entry: String,

    /// New article code; defaults to the current one.
    #[arg(long)]
    pub article: Option<String>,

    /// New absolute quantity; defaults to the current one.
    #[arg(long, value_name = "N")]
    pub quantity: Option<String>,
}

pub fn run_edit(args: &EditArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let mut conn = db::open_store(db_path)?;
    let existing = db::query::get_entry(&conn, &args.entry)?
        .with_context(|| format!("production entry '{}' not found", args.entry))?;

    let article = args.article.as_deref().unwrap_or(&existing.article);
    let quantity = match &args.quantity {
        Some(raw) => model::parse_quantity(raw)?,
        None => existing.quantity,
    };

    let entry = ledger::overwrite_entry(&mut conn, &args.entry, article, quantity, Utc::now())?;
    render(output, &entry, |e, w| {
        writeln!(w, "Entry {} set to {} x {} pcs", e.id, e.article, e.quantity)
    })
}
