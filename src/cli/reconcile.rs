//! Exclusion reconciliation command

use std::path::PathBuf;

use clap::Args;

use crate::error::PnlResult;
use crate::ledger::ingest_file;
use crate::services::{parse_exclusions_file, reconcile, TagService};
use crate::storage::Storage;

/// Arguments for the reconcile command
#[derive(Args)]
pub struct ReconcileArgs {
    /// Path to the ledger export file
    #[arg(short, long, env = "PNLVIEW_LEDGER")]
    pub ledger: PathBuf,

    /// Path to the exclusion dataset (CSV)
    #[arg(short, long)]
    pub exclusions: PathBuf,

    /// Show what would be tagged without persisting the overlay
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the reconcile command
pub fn handle_reconcile_command(storage: &Storage, args: ReconcileArgs) -> PnlResult<()> {
    let snapshot = ingest_file(&args.ledger)?;
    let exclusions = parse_exclusions_file(&args.exclusions)?;
    let outcome = reconcile(&exclusions, &snapshot);

    for matched in &outcome.matches {
        let e = &matched.exclusion;
        println!(
            "  {} {} {} {} -> {}",
            e.date.format("%m/%d/%Y"),
            e.account_code,
            e.amount,
            e.category,
            matched.transaction_id
        );
    }
    for missed in &outcome.unmatched {
        println!(
            "  {} {} {} {} -> no match",
            missed.date.format("%m/%d/%Y"),
            missed.account_code,
            missed.amount,
            missed.category
        );
    }
    println!(
        "{} of {} exclusions matched",
        outcome.matches.len(),
        exclusions.len()
    );

    if args.dry_run {
        println!("Dry run; overlay not saved.");
    } else {
        let added = TagService::new(storage).apply_overlay(outcome.tags)?;
        println!("Saved {} new tags to the overlay.", added);
    }

    Ok(())
}
