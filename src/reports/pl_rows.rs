//! P&L row construction and section totals

use crate::ledger::LedgerSnapshot;
use crate::models::{Account, Money, Section, TagOverlay, Transaction};

use super::rollup::{monthly_amounts, AccountRollup};

/// One row of the P&L: a top-level account with its rolled-up amounts
#[derive(Debug, Clone, PartialEq)]
pub struct PlRow {
    /// The top-level account
    pub account: Account,
    /// Its subtree rollup
    pub rollup: AccountRollup,
}

/// Build the rows for a section: one per parentless account classified into
/// it, sorted by code, suppressing structurally-present but economically-empty
/// accounts (zero YTD and no transactions).
pub fn build_pl_rows(
    section: Section,
    snapshot: &LedgerSnapshot,
    overlay: &TagOverlay,
) -> Vec<PlRow> {
    snapshot
        .accounts
        .values()
        .filter(|a| a.section == section && a.parent_code.is_none())
        .filter_map(|account| {
            let rollup = monthly_amounts(&account.code, snapshot, overlay);
            if !rollup.ytd_total.is_zero() || rollup.transaction_count > 0 {
                Some(PlRow {
                    account: account.clone(),
                    rollup,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Whether a transaction's own account, or its account's parent, classifies
/// into the section. A two-level shortcut equivalent to the full recursive
/// rollup given the data's maximum tree depth.
fn in_section(txn: &Transaction, section: Section, snapshot: &LedgerSnapshot) -> bool {
    let Some(account) = snapshot.accounts.get(&txn.account_code) else {
        return false;
    };
    if account.section == section {
        return true;
    }
    if let Some(parent_code) = &txn.parent_account_code {
        if let Some(parent) = snapshot.accounts.get(parent_code) {
            return parent.section == section;
        }
    }
    false
}

/// Direct (non-recursive) sum over untagged transactions in one month whose
/// account or parent account classifies into the section
pub fn section_monthly_total(
    section: Section,
    month: &str,
    snapshot: &LedgerSnapshot,
    overlay: &TagOverlay,
) -> Money {
    snapshot
        .transactions
        .iter()
        .filter(|t| t.month == month)
        .filter(|t| !overlay.contains_key(&t.id))
        .filter(|t| in_section(t, section, snapshot))
        .map(|t| t.amount)
        .sum()
}

/// Full-period equivalent of [`section_monthly_total`]
pub fn section_period_total(
    section: Section,
    snapshot: &LedgerSnapshot,
    overlay: &TagOverlay,
) -> Money {
    snapshot
        .transactions
        .iter()
        .filter(|t| !overlay.contains_key(&t.id))
        .filter(|t| in_section(t, section, snapshot))
        .map(|t| t.amount)
        .sum()
}
