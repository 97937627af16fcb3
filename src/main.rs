use anyhow::Result;
use clap::{Parser, Subcommand};

use pnlview::cli::{
    handle_orphans_command, handle_reconcile_command, handle_report_command,
    handle_summary_command, handle_tag_command, OrphansArgs, ReconcileArgs, ReportArgs,
    SummaryArgs, TagCommands,
};
use pnlview::config::paths::PnlPaths;
use pnlview::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pnlview",
    version,
    about = "Hierarchical P&L views over flat accounting exports",
    long_about = "pnlview ingests a flat double-entry accounting export and produces \
                  a hierarchical profit-and-loss view: monthly and year-to-date \
                  rollups per account, section totals, top-line summary metrics, \
                  and a tag overlay that excludes selected transactions from \
                  totals without deleting them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full P&L statement with month columns and YTD
    Report(ReportArgs),

    /// Top-line summary metrics
    Summary(SummaryArgs),

    /// Match an exclusion dataset against the ledger and build the tag overlay
    Reconcile(ReconcileArgs),

    /// Manual tag overlay edits
    #[command(subcommand)]
    Tag(TagCommands),

    /// List transactions with no recoverable account code
    Orphans(OrphansArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PnlPaths::new()?;
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match cli.command {
        Commands::Report(args) => handle_report_command(&storage, args)?,
        Commands::Summary(args) => handle_summary_command(&storage, args)?,
        Commands::Reconcile(args) => handle_reconcile_command(&storage, args)?,
        Commands::Tag(cmd) => handle_tag_command(&storage, cmd)?,
        Commands::Orphans(args) => handle_orphans_command(&storage, args)?,
    }

    Ok(())
}
