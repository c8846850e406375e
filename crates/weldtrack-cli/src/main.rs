#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default store location, relative to the working directory.
const DEFAULT_DB_PATH: &str = ".weldtrack/records.sqlite3";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "wt: per-worker production records against monthly norms",
    long_about = None
)]
struct Cli {
    /// Path to the record store database.
    #[arg(long, global = true, env = "WELDTRACK_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Create the record store",
        after_help = "EXAMPLES:\n    # Create the store in the default location\n    wt init\n\n    # Use an explicit database path\n    wt --db /data/records.sqlite3 init"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        about = "Register and list workers",
        after_help = "EXAMPLES:\n    wt worker add Petrov\n    wt worker list --json"
    )]
    Worker(cmd::worker::WorkerArgs),

    #[command(
        about = "Log produced pieces for a worker (current month)",
        long_about = "Log produced pieces for a worker. Logging the same article twice \
                      in one month adds onto the existing entry.",
        after_help = "EXAMPLES:\n    wt log --worker <ID> --article AB-1 --quantity 5"
    )]
    Log(cmd::log::LogArgs),

    #[command(
        about = "Overwrite an entry's article and quantity",
        after_help = "EXAMPLES:\n    wt edit <ENTRY_ID> --quantity 4\n    wt edit <ENTRY_ID> --article AB-2 --quantity 4"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        about = "Show one worker's ledger grouped by month",
        after_help = "EXAMPLES:\n    wt show <WORKER_ID>\n    wt show <WORKER_ID> --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Show the change history of one entry",
        after_help = "EXAMPLES:\n    wt history <ENTRY_ID>"
    )]
    History(cmd::history::HistoryArgs),

    #[command(
        about = "Monthly per-article totals with worker breakdown",
        after_help = "EXAMPLES:\n    wt summary\n    wt summary --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        about = "Manage per-article time norms",
        after_help = "EXAMPLES:\n    wt norm add AB-1 8h\n    wt norm suggest ab"
    )]
    Norm(cmd::norm::NormArgs),

    #[command(
        about = "Export the current month to a JSON file",
        after_help = "EXAMPLES:\n    # Writes welder-data-<month>.json in the working directory\n    wt export\n\n    wt export --output /tmp/july.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        about = "Import a previously exported JSON file",
        after_help = "EXAMPLES:\n    wt import welder-data-July 2026.json"
    )]
    Import(cmd::import::ImportArgs),
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("WELDTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let db = cli.db_path();
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, &db, output),
        Commands::Worker(ref args) => cmd::worker::run_worker(args, &db, output),
        Commands::Log(ref args) => cmd::log::run_log(args, &db, output),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, &db, output),
        Commands::Show(ref args) => cmd::show::run_show(args, &db, output),
        Commands::History(ref args) => cmd::history::run_history(args, &db, output),
        Commands::Summary(ref args) => cmd::summary::run_summary(args, &db, output),
        Commands::Norm(ref args) => cmd::norm::run_norm(args, &db, output),
        Commands::Export(ref args) => cmd::export::run_export(args, &db, output),
        Commands::Import(ref args) => cmd::import::run_import(args, &db, output),
    }
}
