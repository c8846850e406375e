//! `wt norm` — per-article time norms.

use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde_json::json;
use std::path::Path;
use weldtrack_core::{db, norms};

#[derive(Args, Debug)]
pub struct NormArgs {
    #[command(subcommand)]
    pub command: NormCommand,
}

#[derive(Subcommand, Debug)]
pub enum NormCommand {
    /// Add a norm. The article must not already exist (exact match).
    Add {
        /// Article code.
        article: String,
        /// Duration label, e.g. 8h.
        time: String,
    },
    /// Edit a norm in place.
    Edit {
        /// Norm id.
        id: String,
        /// New article code; defaults to the current one.
        #[arg(long)]
        article: Option<String>,
        /// New duration label; defaults to the current one.
        #[arg(long)]
        time: Option<String>,
    },
    /// Delete a norm.
    Delete {
        /// Norm id.
        id: String,
    },
    /// List all norms.
    List,
    /// Suggest norms whose article starts with a prefix (2+ characters).
    Suggest {
        /// Case-insensitive article prefix.
        prefix: String,
    },
}

pub fn run_norm(args: &NormArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;

    match &args.command {
        NormCommand::Add { article, time } => {
            let norm = norms::add_norm(&conn, article, time)?;
            render(output, &norm, |n, w| {
                writeln!(w, "Norm {}: {} - {}", n.id, n.article, n.time)
            })
        }
        NormCommand::Edit { id, article, time } => {
            let existing = db::query::get_norm(&conn, id)?
                .with_context(|| format!("norm '{id}' not found"))?;
            let article = article.as_deref().unwrap_or(&existing.article);
            let time = time.as_deref().unwrap_or(&existing.time);
            let norm = norms::edit_norm(&conn, id, article, time)?;
            render(output, &norm, |n, w| {
                writeln!(w, "Norm {}: {} - {}", n.id, n.article, n.time)
            })
        }
        NormCommand::Delete { id } => {
            norms::delete_norm(&conn, id)?;
            render(output, &json!({ "deleted": id }), |_, w| {
                writeln!(w, "Norm {id} deleted")
            })
        }
        NormCommand::List => {
            let all = db::query::list_norms(&conn)?;
            render(output, &all, |norms, w| {
                for norm in norms {
                    writeln!(w, "{}  {}  {}", norm.id, norm.article, norm.time)?;
                }
                Ok(())
            })
        }
        NormCommand::Suggest { prefix } => {
            let hits = norms::suggest(&conn, prefix)?;
            render(output, &hits, |norms, w| {
                for norm in norms {
                    writeln!(w, "{}  {}", norm.article, norm.time)?;
                }
                Ok(())
            })
        }
    }
}
