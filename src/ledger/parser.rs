//! The export parser and account-tree builder
//!
//! The export is a double-entry ledger: every economic event appears twice,
//! once filed under the P&L account's section and once under the offsetting
//! cash/bank account's section. Rows are therefore only consumed while inside
//! a P&L section, and a row's account is always the enclosing section name.
//! Column 7 of a row looks like an account reference but is the offsetting
//! account and is ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{PnlError, PnlResult};
use crate::models::account::{self, Account};
use crate::models::{Money, RawRecord, Transaction, TransactionId};

use super::fields::{
    is_date_shaped, is_separator_only, section_header_label, split_fields, HEADER_LINES,
    TOTAL_ROW_MARKER,
};

/// The immutable result of one ingestion pass
///
/// A new ingestion fully replaces the prior snapshot; nothing here is patched
/// incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    /// Ordered transaction list, in export order
    pub transactions: Vec<Transaction>,

    /// Chart of accounts keyed by code
    pub accounts: BTreeMap<String, Account>,

    /// Sorted distinct reporting month keys (`YYYY-MM`)
    pub months: Vec<String>,
}

impl LedgerSnapshot {
    /// Look up an account by code
    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Look up a transaction by id (linear scan; the list is small)
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Transactions that resolved to no account node
    ///
    /// These stay in the transaction list but are invisible to every rollup
    /// and section total; this listing exists so a debugging pass can surface
    /// them.
    pub fn orphans(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| !self.accounts.contains_key(&t.account_code))
            .collect()
    }
}

/// Parser state over export lines
///
/// Every section header transitions deterministically; rows are only consumed
/// in `InPnlSection`. There is no terminal state beyond end-of-input.
enum ParserState {
    /// Before any section header
    Outside,
    /// Inside a section whose leading numeral is a P&L code
    InPnlSection { name: String },
    /// Inside any other section (bank, credit card, textual headers)
    InOtherSection,
}

/// Whether a code string is a P&L account code, [4000, 8000)
fn is_pnl_code(code: &str) -> bool {
    matches!(code.parse::<u32>(), Ok(n) if (4000..8000).contains(&n))
}

/// Read and parse a ledger export file
///
/// Per-line problems never fail ingestion; only an unreadable source does.
pub fn ingest_file(path: impl AsRef<Path>) -> PnlResult<LedgerSnapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| PnlError::Ingest(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(parse_ledger(&text))
}

/// Parse export text into a snapshot
///
/// Pure: identical input text yields a structurally identical snapshot.
pub fn parse_ledger(text: &str) -> LedgerSnapshot {
    let records = scan_records(text);
    let accounts = build_accounts(&records);

    let transactions: Vec<Transaction> = records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Transaction::from_raw(raw, index))
        .collect();

    let months: BTreeSet<String> = transactions.iter().map(|t| t.month.clone()).collect();

    LedgerSnapshot {
        transactions,
        accounts,
        months: months.into_iter().collect(),
    }
}

/// Scan lines into raw records with the two-state machine
fn scan_records(text: &str) -> Vec<RawRecord> {
    let mut state = ParserState::Outside;
    let mut records = Vec::new();

    // The first lines are always report metadata
    for line in text.lines().skip(HEADER_LINES) {
        let line = line.trim();

        if line.is_empty() || is_separator_only(line) {
            continue;
        }
        if line.starts_with(TOTAL_ROW_MARKER) {
            continue;
        }

        // Every header resets state, numeric or not. A bank header following
        // a P&L header must stop subsequent rows from being attributed to the
        // last-seen P&L section.
        if let Some(label) = section_header_label(line) {
            state = if is_pnl_code(&account::leading_code(label)) {
                ParserState::InPnlSection {
                    name: label.to_string(),
                }
            } else {
                ParserState::InOtherSection
            };
            continue;
        }

        let section_name = match &state {
            ParserState::InPnlSection { name } => name,
            _ => continue,
        };

        let fields = split_fields(line);

        // A transaction row has an empty leading field and a strictly
        // date-shaped second field
        if !fields.first().is_some_and(|f| f.is_empty()) {
            continue;
        }
        let Some(date_field) = fields.get(1) else {
            continue;
        };
        if !is_date_shaped(date_field) {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(date_field, "%m/%d/%Y") else {
            continue;
        };

        let get = |i: usize| fields.get(i).cloned().unwrap_or_default();

        records.push(RawRecord {
            date,
            txn_type: get(2),
            reference: get(3),
            name: get(4),
            class: get(5),
            memo: get(6),
            // Field 7 is the offsetting bank account; the real account is
            // always the enclosing section
            account_path: section_name.clone(),
            amount: Money::parse_lenient(&get(8)),
            balance: Money::parse_lenient(&get(9)),
        });
    }

    records
}

/// Build the chart of accounts from the records' paths
///
/// Two-pass over a flat, order-independent stream: collect every
/// (code, parent, path) triple first, then materialize nodes (synthesizing
/// parent stubs), then link edges. Re-encountering the same child never
/// duplicates a parent->child edge.
fn build_accounts(records: &[RawRecord]) -> BTreeMap<String, Account> {
    struct Triple {
        code: String,
        parent_code: Option<String>,
        path: String,
    }

    let mut triples = Vec::new();
    for record in records {
        let (code, parent_code) = account::path_codes(&record.account_path);
        if code.is_empty() {
            continue;
        }
        triples.push(Triple {
            code,
            parent_code,
            path: record.account_path.clone(),
        });
    }

    let mut accounts: BTreeMap<String, Account> = BTreeMap::new();

    for triple in &triples {
        match &triple.parent_code {
            None => {
                accounts
                    .entry(triple.code.clone())
                    .or_insert_with(|| Account::top_level(&triple.code, triple.path.trim()));
            }
            Some(parent_code) => {
                accounts
                    .entry(triple.code.clone())
                    .or_insert_with(|| Account::child(&triple.code, parent_code, &triple.path));
                accounts.entry(parent_code.clone()).or_insert_with(|| {
                    Account::top_level(parent_code, account::parent_segment(&triple.path))
                });
            }
        }
    }

    for triple in &triples {
        if let Some(parent_code) = &triple.parent_code {
            // A degenerate path repeating the same code must not create a
            // self-edge
            if parent_code == &triple.code {
                continue;
            }
            if let Some(parent) = accounts.get_mut(parent_code) {
                parent.add_child(&triple.code);
            }
        }
    }

    accounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;

    /// Five metadata lines the parser always skips, then the given body
    fn export(body: &str) -> String {
        format!(
            "Acme Co\nProfit and Loss Detail\nJanuary - December 2025\nAccrual Basis\n\n{}",
            body
        )
    }

    #[test]
    fn test_double_entry_disambiguation() {
        // The same economic event appears under a P&L header and a bank
        // header; only the P&L side yields a transaction.
        let text = export(
            "4000 Sales,,,,,,,,,\n\
             ,01/15/2025,Sale,,CustomerA,,,,1500.00,1500.00\n\
             Checking,,,,,,,,,\n\
             ,01/15/2025,Deposit,,CustomerA,,,,1500.00,\n",
        );
        let snapshot = parse_ledger(&text);

        assert_eq!(snapshot.transactions.len(), 1);
        let txn = &snapshot.transactions[0];
        assert_eq!(txn.amount, Money::from_cents(150000));
        assert_eq!(txn.month, "2025-01");
        assert_eq!(txn.account_code, "4000");
        assert_eq!(txn.account_path, "4000 Sales");
        assert_eq!(snapshot.months, vec!["2025-01"]);
    }

    #[test]
    fn test_non_numeric_header_resets_pnl_state() {
        let text = export(
            "4000 Sales,,,,,,,,,\n\
             ,01/15/2025,Sale,,A,,,,100.00,\n\
             Credit Card,,,,,,,,,\n\
             ,01/16/2025,Charge,,B,,,,50.00,\n\
             4030 Shipping Income,,,,,,,,,\n\
             ,01/17/2025,Sale,,C,,,,25.00,\n",
        );
        let snapshot = parse_ledger(&text);

        let codes: Vec<&str> = snapshot
            .transactions
            .iter()
            .map(|t| t.account_code.as_str())
            .collect();
        assert_eq!(codes, vec!["4000", "4030"]);
    }

    #[test]
    fn test_out_of_range_numeric_header_is_not_pnl() {
        // 1000-series (balance sheet) and 8000-series codes are outside
        // [4000, 8000)
        let text = export(
            "1000 Checking,,,,,,,,,\n\
             ,01/15/2025,Deposit,,A,,,,100.00,\n\
             8000 Suspense,,,,,,,,,\n\
             ,01/16/2025,Entry,,B,,,,10.00,\n",
        );
        let snapshot = parse_ledger(&text);
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_metadata_lines_are_skipped() {
        // A header-shaped line within the first five lines must not register
        let text = "4000 Sales,,,,,,,,,\n\
                    ,01/01/2025,Sale,,A,,,,10.00,\n\
                    \n\
                    \n\
                    \n\
                    4000 Sales,,,,,,,,,\n\
                    ,01/15/2025,Sale,,B,,,,20.00,\n";
        let snapshot = parse_ledger(text);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].name, "B");
    }

    #[test]
    fn test_total_and_separator_rows_are_ignored() {
        let text = export(
            "4000 Sales,,,,,,,,,\n\
             ,01/15/2025,Sale,,A,,,,100.00,\n\
             ,,,,,,,,,\n\
             Total for 4000 Sales,,,,,,,,500.00,\n\
             ,01/16/2025,Sale,,B,,,,200.00,\n",
        );
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.transactions.len(), 2);
    }

    #[test]
    fn test_malformed_rows_are_skipped_silently() {
        let text = export(
            "4000 Sales,,,,,,,,,\n\
             ,1/15/2025,Sale,,BadDateShape,,,,10.00,\n\
             ,13/40/2025,Sale,,ImpossibleDate,,,,10.00,\n\
             NotARow\n\
             ,01/15/2025,Sale,,Good,,,,10.00,\n",
        );
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].name, "Good");
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let text = export(
            "6100 Office,,,,,,,,,\n\
             ,01/20/2025,Expense,,\"Smith, John\",,\"desk, chair\",,\"-1,250.00\",\n",
        );
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.transactions.len(), 1);
        let txn = &snapshot.transactions[0];
        assert_eq!(txn.name, "Smith, John");
        assert_eq!(txn.memo, "desk, chair");
        assert_eq!(txn.amount, Money::from_cents(-125000));
    }

    #[test]
    fn test_offsetting_account_column_is_ignored() {
        let text = export(
            "6340 Meals,,,,,,,,,\n\
             ,02/01/2025,Expense,,Vendor,,,1000 Checking,-50.00,\n",
        );
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.transactions[0].account_code, "6340");
        assert_eq!(snapshot.transactions[0].account_path, "6340 Meals");
    }

    #[test]
    fn test_child_section_builds_parent_stub() {
        // Child section appears before any standalone parent section
        let text = export(
            "6000 Cost of Sales:6065 Merchant Fees,,,,,,,,,\n\
             ,01/10/2025,Fee,,Processor,,,,-30.00,\n",
        );
        let snapshot = parse_ledger(&text);

        let child = snapshot.account("6065").unwrap();
        assert_eq!(child.parent_code.as_deref(), Some("6000"));
        assert_eq!(child.depth, 1);
        assert_eq!(child.section, Section::CostOfSales);

        let parent = snapshot.account("6000").unwrap();
        assert_eq!(parent.name, "Cost of Sales");
        assert_eq!(parent.parent_code, None);
        assert_eq!(parent.depth, 0);
        assert_eq!(parent.children, vec!["6065"]);
    }

    #[test]
    fn test_no_duplicate_child_edges() {
        let text = export(
            "6000 Cost of Sales:6065 Merchant Fees,,,,,,,,,\n\
             ,01/10/2025,Fee,,A,,,,-30.00,\n\
             ,01/11/2025,Fee,,B,,,,-40.00,\n\
             6000 Cost of Sales,,,,,,,,,\n\
             ,01/12/2025,Direct,,C,,,,-10.00,\n\
             6000 Cost of Sales:6065 Merchant Fees,,,,,,,,,\n\
             ,01/13/2025,Fee,,D,,,,-20.00,\n",
        );
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.account("6000").unwrap().children, vec!["6065"]);
    }

    #[test]
    fn test_unattributable_transaction_is_kept_as_orphan() {
        // P&L section whose leaf segment carries no numeral: the transaction
        // survives but attaches to no account node
        let text = export(
            "4000 Sales:Misc Adjustments,,,,,,,,,\n\
             ,03/05/2025,Adj,,X,,,,-15.00,\n",
        );
        let snapshot = parse_ledger(&text);

        assert_eq!(snapshot.transactions.len(), 1);
        assert!(!snapshot.transactions[0].is_attributable());
        assert_eq!(snapshot.orphans().len(), 1);
        assert!(!snapshot.accounts.contains_key(""));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = export(
            "4000 Sales,,,,,,,,,\n\
             ,01/15/2025,Sale,,A,,,,100.00,\n\
             6000 Cost of Sales:6065 Merchant Fees,,,,,,,,,\n\
             ,01/16/2025,Fee,,B,,,,-3.00,\n\
             Checking,,,,,,,,,\n\
             ,01/15/2025,Deposit,,A,,,,100.00,\n",
        );
        let first = parse_ledger(&text);
        let second = parse_ledger(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_windows_line_endings() {
        let text = export("4000 Sales,,,,,,,,,\r\n,01/15/2025,Sale,,A,,,,100.00,\r\n");
        let snapshot = parse_ledger(&text);
        assert_eq!(snapshot.transactions.len(), 1);
    }

    #[test]
    fn test_ingest_file_missing_source_is_classified() {
        let err = ingest_file("/nonexistent/export.csv").unwrap_err();
        assert!(matches!(err, PnlError::Ingest(_)));
    }
}
