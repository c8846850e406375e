//! `wt summary` — monthly per-article totals.

use crate::output::{OutputMode, render};
use clap::Args;
use std::path::Path;
use weldtrack_core::{db, summary};

#[derive(Args, Debug)]
pub struct SummaryArgs {}

pub fn run_summary(_args: &SummaryArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;
    let entries = db::query::list_entries(&conn)?;
    let workers = db::query::list_workers(&conn)?;
    let summaries = summary::summarize(&entries, &workers);

    render(output, &summaries, |groups, w| {
        let mut last_month: Option<&str> = None;
        for group in groups {
            if last_month != Some(group.month.as_str()) {
                writeln!(w, "\n{}", group.month)?;
                last_month = Some(group.month.as_str());
            }
            writeln!(w, "  {}  {} pcs", group.article, group.total_quantity)?;
            for share in &group.workers {
                writeln!(w, "    {}  {} pcs", share.worker_name, share.quantity)?;
            }
        }
        Ok(())
    })
}
