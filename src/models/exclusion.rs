//! Exclusion dataset model
//!
//! An exclusion is one row of the independently curated "excluded items"
//! dataset. It is an advisory overlay over the ledger, not an
//! integrity-checked record: unmatched rows are dropped without error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::tag::TagCategory;
use super::transaction::TransactionId;

/// One row of the exclusion dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Transaction date to match on
    pub date: NaiveDate,
    /// Vendor name (informational)
    pub vendor: String,
    /// Memo (informational)
    pub memo: String,
    /// Source account display name (informational)
    pub account_name: String,
    /// Account code to match on
    pub account_code: String,
    /// Amount to match on, within one cent
    pub amount: Money,
    /// Category label, carried verbatim into the tag's sub-account
    pub category: String,
    /// Free-text justification
    pub justification: String,
}

impl Exclusion {
    /// The tag category this exclusion maps to
    ///
    /// "Personal *" labels and the bare "Discretionary" label are personal;
    /// everything else is non-recurring.
    pub fn tag_category(&self) -> TagCategory {
        if self.category.contains("Personal") || self.category == "Discretionary" {
            TagCategory::Personal
        } else {
            TagCategory::NonRecurring
        }
    }
}

/// Audit link from an exclusion to the transaction it claimed
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionMatch {
    /// The exclusion row
    pub exclusion: Exclusion,
    /// The claimed transaction
    pub transaction_id: TransactionId,
}
