//! Per-account monthly/YTD rollups
//!
//! A rollup collects every transaction directly on an account plus,
//! transitively, every transaction on every descendant via the children
//! adjacency list. Tagged transactions are excluded from published totals; an
//! include-tagged mode exists solely so exclusion review can show what was
//! removed.

use std::collections::BTreeMap;

use crate::ledger::LedgerSnapshot;
use crate::models::{Money, TagOverlay, Transaction};

/// Monthly amounts, YTD total, and count for one account subtree
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRollup {
    /// The rolled-up account's code
    pub account_code: String,

    /// Signed sum per known reporting month (every snapshot month is present,
    /// zero when inactive)
    pub monthly_amounts: BTreeMap<String, Money>,

    /// Year-to-date total across all months
    pub ytd_total: Money,

    /// Number of contributing transactions
    pub transaction_count: usize,
}

/// Collect the transactions for an account subtree, in export order per level
///
/// A transaction contributes when its own code matches, or when its parent
/// code matches and its own code resolved to no known account (the leaf is
/// then folded into the parent rather than lost).
pub fn account_transactions<'a>(code: &str, snapshot: &'a LedgerSnapshot) -> Vec<&'a Transaction> {
    let mut out = Vec::new();
    collect(code, snapshot, &mut out);
    out
}

fn collect<'a>(code: &str, snapshot: &'a LedgerSnapshot, out: &mut Vec<&'a Transaction>) {
    let Some(account) = snapshot.accounts.get(code) else {
        return;
    };

    for txn in &snapshot.transactions {
        if txn.account_code == code
            || (txn.parent_account_code.as_deref() == Some(code)
                && !snapshot.accounts.contains_key(&txn.account_code))
        {
            out.push(txn);
        }
    }

    for child in &account.children {
        collect(child, snapshot, out);
    }
}

/// Roll up an account subtree, excluding tagged transactions
pub fn monthly_amounts(code: &str, snapshot: &LedgerSnapshot, overlay: &TagOverlay) -> AccountRollup {
    rollup(code, snapshot, overlay, false)
}

/// Roll up an account subtree including tagged transactions
///
/// For exclusion review display only; must never feed published totals.
pub fn monthly_amounts_including_tagged(
    code: &str,
    snapshot: &LedgerSnapshot,
    overlay: &TagOverlay,
) -> AccountRollup {
    rollup(code, snapshot, overlay, true)
}

fn rollup(
    code: &str,
    snapshot: &LedgerSnapshot,
    overlay: &TagOverlay,
    include_tagged: bool,
) -> AccountRollup {
    let mut monthly_amounts: BTreeMap<String, Money> = snapshot
        .months
        .iter()
        .map(|m| (m.clone(), Money::zero()))
        .collect();
    let mut ytd_total = Money::zero();
    let mut transaction_count = 0;

    for txn in account_transactions(code, snapshot) {
        if !include_tagged && overlay.contains_key(&txn.id) {
            continue;
        }
        if let Some(slot) = monthly_amounts.get_mut(&txn.month) {
            *slot += txn.amount;
            ytd_total += txn.amount;
        }
        transaction_count += 1;
    }

    AccountRollup {
        account_code: code.to_string(),
        monthly_amounts,
        ytd_total,
        transaction_count,
    }
}
