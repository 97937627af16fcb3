//! Top-line summary command

use std::path::PathBuf;

use clap::Args;

use crate::error::PnlResult;
use crate::ledger::ingest_file;
use crate::reports::PlSummary;
use crate::storage::Storage;

/// Arguments for the summary command
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to the ledger export file
    #[arg(short, long, env = "PNLVIEW_LEDGER")]
    pub ledger: PathBuf,

    /// Emit CSV instead of the terminal table
    #[arg(long)]
    pub csv: bool,
}

/// Handle the summary command
pub fn handle_summary_command(storage: &Storage, args: SummaryArgs) -> PnlResult<()> {
    let snapshot = ingest_file(&args.ledger)?;
    let overlay = storage.tags.get_all()?;
    let summary = PlSummary::generate(&snapshot, &overlay);

    if args.csv {
        let stdout = std::io::stdout();
        summary.export_csv(&mut stdout.lock())?;
    } else {
        print!("{}", summary.format_terminal());
    }

    Ok(())
}
