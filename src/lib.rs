//! pnlview - Profit-and-loss viewer for double-entry accounting exports
//!
//! This library ingests a flat, section-delimited accounting export and turns
//! it into a hierarchical profit-and-loss view: per-account monthly and
//! year-to-date rollups, section totals, top-line summary metrics, and an
//! "exclusion" overlay that removes selected transactions from totals without
//! deleting them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management for persisted tag data
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, accounts, sections, tags)
//! - `ledger`: The export parser and account-tree builder
//! - `reports`: The aggregation engine (rollups, section totals, summary)
//! - `services`: Exclusion reconciliation and tag overlay mutation
//! - `storage`: JSON file storage for the tag overlay and tag config
//! - `cli`: Command handlers for the `pnlview` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pnlview::ledger;
//! use pnlview::reports::PlSummary;
//!
//! let snapshot = ledger::ingest_file("export.csv")?;
//! let summary = PlSummary::generate(&snapshot, &Default::default());
//! println!("{}", summary.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::PnlError;
