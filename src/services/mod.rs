//! Business logic layer
//!
//! Exclusion reconciliation and tag overlay mutation. Services never touch
//! the transaction list: tagging only removes a transaction from computed
//! sums, never from the record set.

pub mod reconciliation;
pub mod tags;

pub use reconciliation::{parse_exclusions, parse_exclusions_file, reconcile, ReconcileOutcome};
pub use tags::TagService;
