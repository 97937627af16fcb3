//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger, reports, and service
//! layers. Each command re-ingests the ledger export it is pointed at; only
//! the tag overlay persists between runs.

pub mod orphans;
pub mod reconcile;
pub mod report;
pub mod summary;
pub mod tag;

pub use orphans::{handle_orphans_command, OrphansArgs};
pub use reconcile::{handle_reconcile_command, ReconcileArgs};
pub use report::{handle_report_command, ReportArgs};
pub use summary::{handle_summary_command, SummaryArgs};
pub use tag::{handle_tag_command, TagCommands};
