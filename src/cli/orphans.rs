//! Orphan transaction listing
//!
//! Transactions whose account path yields no recoverable code never appear in
//! rollups; this command makes them visible so the export can be fixed.

use std::path::PathBuf;

use clap::Args;

use crate::error::PnlResult;
use crate::ledger::ingest_file;
use crate::storage::Storage;

/// Arguments for the orphans command
#[derive(Args)]
pub struct OrphansArgs {
    /// Path to the ledger export file
    #[arg(short, long, env = "PNLVIEW_LEDGER")]
    pub ledger: PathBuf,
}

/// Handle the orphans command
pub fn handle_orphans_command(_storage: &Storage, args: OrphansArgs) -> PnlResult<()> {
    let snapshot = ingest_file(&args.ledger)?;
    let orphans = snapshot.orphans();

    if orphans.is_empty() {
        println!("No orphan transactions.");
        return Ok(());
    }

    for txn in &orphans {
        println!(
            "  {}  {:<40}  {:>12}  {}",
            txn.date.format("%m/%d/%Y"),
            txn.account_path,
            txn.amount.to_string(),
            txn.id
        );
    }
    println!(
        "{} of {} transactions have no recoverable account code",
        orphans.len(),
        snapshot.transactions.len()
    );

    Ok(())
}
