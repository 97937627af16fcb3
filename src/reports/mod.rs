//! The aggregation engine
//!
//! Computes per-account and per-section monthly/YTD rollups and the top-line
//! summary metrics. Everything here is derived on demand from a snapshot and
//! the current tag overlay; no totals are cached, so a tag change is always
//! reflected immediately.

pub mod pl_rows;
pub mod rollup;
pub mod statement;
pub mod summary;

pub use pl_rows::{build_pl_rows, section_monthly_total, section_period_total, PlRow};
pub use rollup::{account_transactions, monthly_amounts, AccountRollup};
pub use statement::PlStatement;
pub use summary::PlSummary;

use chrono::NaiveDate;

/// Render a `YYYY-MM` month key as a short column label ("Jan 25")
pub fn format_month_label(month: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d") {
        Ok(date) => date.format("%b %y").to_string(),
        Err(_) => month.to_string(),
    }
}
