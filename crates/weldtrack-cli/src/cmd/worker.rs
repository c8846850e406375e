//! `wt worker` — register and list workers.

use crate::output::{OutputMode, render};
use anyhow::bail;
use clap::{Args, Subcommand};
use std::path::Path;
use weldtrack_core::{db, ledger};

#[derive(Args, Debug)]
pub struct WorkerArgs {
    #[command(subcommand)]
    pub command: WorkerCommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkerCommand {
    /// Register a new worker.
    Add {
        /// Worker name (usually the surname).
        name: String,
    },
    /// List all registered workers.
    List,
}

pub fn run_worker(args: &WorkerArgs, db_path: &Path, output: OutputMode) -> anyhow::Result<()> {
    let conn = db::open_store(db_path)?;

    match &args.command {
        WorkerCommand::Add { name } => {
            if name.trim().is_empty() {
                bail!("worker name must not be empty");
            }
            let worker = ledger::register_worker(&conn, name)?;
            render(output, &worker, |w, out| {
                writeln!(out, "Registered {} ({})", w.name, w.id)
            })
        }
        WorkerCommand::List => {
            let workers = db::query::list_workers(&conn)?;
            render(output, &workers, |ws, out| {
                for worker in ws {
                    writeln!(out, "{}  {}", worker.id, worker.name)?;
                }
                Ok(())
            })
        }
    }
}
