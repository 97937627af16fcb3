//! Transaction model
//!
//! A raw record comes straight out of one accepted export row; a Transaction
//! enriches it with a stable id, reporting month key, and resolved account
//! codes. Both are immutable once an ingestion pass completes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Stable transaction identifier, derived deterministically from the record
/// so that re-parsing identical source text yields identical ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Derive an id from the record's date, account path, and position
    pub fn derive(date: NaiveDate, account_path: &str, index: usize) -> Self {
        let account_part: String = account_path
            .chars()
            .take(20)
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Self(format!(
            "txn-{}-{}-{}",
            date.format("%m-%d-%Y"),
            account_part,
            index
        ))
    }

    /// Wrap an existing id string (e.g. from CLI input)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row accepted by the parser, before enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Transaction date
    pub date: NaiveDate,
    /// Type label (e.g. "Expense", "Deposit")
    pub txn_type: String,
    /// Reference number
    pub reference: String,
    /// Counterparty name
    pub name: String,
    /// Class label
    pub class: String,
    /// Memo text
    pub memo: String,
    /// Full account path, always the enclosing section name
    pub account_path: String,
    /// Signed amount
    pub amount: Money,
    /// Running balance from the export
    pub balance: Money,
}

/// A transaction with derived reporting fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Type label
    pub txn_type: String,

    /// Reference number
    #[serde(default)]
    pub reference: String,

    /// Counterparty name
    #[serde(default)]
    pub name: String,

    /// Class label
    #[serde(default)]
    pub class: String,

    /// Memo text
    #[serde(default)]
    pub memo: String,

    /// Full account path
    pub account_path: String,

    /// Signed amount
    pub amount: Money,

    /// Running balance from the export
    pub balance: Money,

    /// Reporting month key, `YYYY-MM`
    pub month: String,

    /// Resolved account code; empty when the path has no leading numeral,
    /// making the transaction unattributable (kept but invisible to rollups)
    pub account_code: String,

    /// Resolved parent account code
    pub parent_account_code: Option<String>,
}

impl Transaction {
    /// Enrich a raw record with derived fields
    pub fn from_raw(raw: RawRecord, index: usize) -> Self {
        let (account_code, parent_account_code) = super::account::path_codes(&raw.account_path);
        Self {
            id: TransactionId::derive(raw.date, &raw.account_path, index),
            month: raw.date.format("%Y-%m").to_string(),
            date: raw.date,
            txn_type: raw.txn_type,
            reference: raw.reference,
            name: raw.name,
            class: raw.class,
            memo: raw.memo,
            account_path: raw.account_path,
            amount: raw.amount,
            balance: raw.balance,
            account_code,
            parent_account_code,
        }
    }

    /// Whether this transaction resolved to an account node
    pub fn is_attributable(&self) -> bool {
        !self.account_code.is_empty()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount
        )
    }
}
