//! Ledger export parsing
//!
//! Turns the raw double-entry export text into an ordered transaction list,
//! a chart of accounts, and the set of reporting months.

pub mod fields;
pub mod parser;

pub use parser::{ingest_file, parse_ledger, LedgerSnapshot};
