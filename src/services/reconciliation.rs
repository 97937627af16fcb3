//! Exclusion reconciliation
//!
//! Matches the independently curated exclusion dataset against parsed
//! transactions and synthesizes the tag overlay. Matching is
//! first-match-wins with at most one tag per transaction; unmatched
//! exclusions are advisory and dropped without error. Re-running against the
//! same inputs yields the same tag set.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;

use crate::error::{PnlError, PnlResult};
use crate::ledger::LedgerSnapshot;
use crate::models::{Exclusion, ExclusionMatch, Money, Tag, TagOverlay};

/// Amount tolerance in cents, absorbing rounding in the exclusion source
const AMOUNT_TOLERANCE_CENTS: i64 = 1;

/// Result of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The synthesized overlay (transaction id -> tag)
    pub tags: TagOverlay,
    /// Audit links, in exclusion order
    pub matches: Vec<ExclusionMatch>,
    /// Exclusions that claimed no transaction
    pub unmatched: Vec<Exclusion>,
}

/// Read the exclusion dataset from a file
pub fn parse_exclusions_file(path: impl AsRef<Path>) -> PnlResult<Vec<Exclusion>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        PnlError::Reconciliation(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_exclusions(file)
}

/// Parse the exclusion dataset
///
/// The header row is ignored; each subsequent row carries 8 meaningful
/// columns in order: date, vendor, memo, account name, account code, amount,
/// category, justification. Structurally invalid rows (too few columns, or a
/// date that is not `MM/DD/YYYY`) are skipped; everything else about a row is
/// taken as-is.
pub fn parse_exclusions<R: Read>(reader: R) -> PnlResult<Vec<Exclusion>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut exclusions = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => continue,
        };
        if record.len() < 8 {
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let Ok(date) = NaiveDate::parse_from_str(&field(0), "%m/%d/%Y") else {
            continue;
        };

        exclusions.push(Exclusion {
            date,
            vendor: field(1),
            memo: field(2),
            account_name: field(3),
            account_code: field(4),
            amount: Money::parse_lenient(&field(5)),
            category: field(6),
            justification: field(7),
        });
    }

    Ok(exclusions)
}

/// Match exclusions against the snapshot's transactions
///
/// For each exclusion, in listed order, the first not-yet-claimed transaction
/// whose date, account code, and amount (within one cent) all match is
/// claimed and tagged. The matching key is not guaranteed unique; two
/// same-day, same-account, same-amount transactions are indistinguishable and
/// the earlier-listed exclusion wins.
pub fn reconcile(exclusions: &[Exclusion], snapshot: &LedgerSnapshot) -> ReconcileOutcome {
    let mut tags = TagOverlay::new();
    let mut matches = Vec::new();
    let mut unmatched = Vec::new();

    for exclusion in exclusions {
        let claimed = snapshot.transactions.iter().find(|t| {
            t.date == exclusion.date
                && t.account_code == exclusion.account_code
                && (t.amount - exclusion.amount).abs().cents() <= AMOUNT_TOLERANCE_CENTS
                && !tags.contains_key(&t.id)
        });

        match claimed {
            Some(txn) => {
                tags.insert(
                    txn.id.clone(),
                    Tag::new(exclusion.tag_category(), exclusion.category.clone()),
                );
                matches.push(ExclusionMatch {
                    exclusion: exclusion.clone(),
                    transaction_id: txn.id.clone(),
                });
            }
            None => unmatched.push(exclusion.clone()),
        }
    }

    ReconcileOutcome {
        tags,
        matches,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_ledger;
    use crate::models::TagCategory;
    use crate::reports::monthly_amounts;

    fn export(body: &str) -> String {
        format!("A\nB\nC\nD\n\n{}", body)
    }

    fn sample_snapshot() -> LedgerSnapshot {
        parse_ledger(&export(
            "6340 Meals,,,,,,,,,\n\
             ,02/01/2025,Expense,,Diner,,,,50.00,\n\
             ,02/01/2025,Expense,,Diner,,,,50.00,\n\
             ,02/15/2025,Expense,,Cafe,,,,25.00,\n",
        ))
    }

    const EXCLUSIONS_CSV: &str = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
02/01/2025,Diner,lunch,Meals,6340,50.00,Personal Meals,owner lunch
02/15/2025,Cafe,coffee,Meals,6340,25.00,One-Time Event,offsite
";

    #[test]
    fn test_parse_exclusions() {
        let exclusions = parse_exclusions(EXCLUSIONS_CSV.as_bytes()).unwrap();
        assert_eq!(exclusions.len(), 2);
        assert_eq!(exclusions[0].vendor, "Diner");
        assert_eq!(exclusions[0].account_code, "6340");
        assert_eq!(exclusions[0].amount, Money::from_cents(5000));
        assert_eq!(exclusions[0].category, "Personal Meals");
    }

    #[test]
    fn test_parse_exclusions_skips_short_and_bad_rows() {
        let csv = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
02/01/2025,Diner,short,row
not-a-date,V,m,A,6340,10.00,Cat,j
02/15/2025,Cafe,coffee,Meals,6340,25.00,One-Time Event,offsite
";
        let exclusions = parse_exclusions(csv.as_bytes()).unwrap();
        assert_eq!(exclusions.len(), 1);
        assert_eq!(exclusions[0].vendor, "Cafe");
    }

    #[test]
    fn test_reconcile_tags_and_categories() {
        let snapshot = sample_snapshot();
        let exclusions = parse_exclusions(EXCLUSIONS_CSV.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);

        assert_eq!(outcome.tags.len(), 2);
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.unmatched.is_empty());

        let meal_tag = &outcome.tags[&outcome.matches[0].transaction_id];
        assert_eq!(meal_tag.category, TagCategory::Personal);
        assert_eq!(meal_tag.sub_account, "Personal Meals");

        let event_tag = &outcome.tags[&outcome.matches[1].transaction_id];
        assert_eq!(event_tag.category, TagCategory::NonRecurring);
        assert_eq!(event_tag.sub_account, "One-Time Event");
    }

    #[test]
    fn test_first_match_wins_on_ambiguous_transactions() {
        // Two identical transactions, two exclusions that could each match
        // either: each exclusion claims one, in order.
        let snapshot = sample_snapshot();
        let csv = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
02/01/2025,Diner,a,Meals,6340,50.00,Personal Meals,first
02/01/2025,Diner,b,Meals,6340,50.00,One-Time Event,second
";
        let exclusions = parse_exclusions(csv.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);

        assert_eq!(outcome.matches.len(), 2);
        assert_ne!(
            outcome.matches[0].transaction_id,
            outcome.matches[1].transaction_id
        );
        // The earlier-listed exclusion claimed the earlier transaction
        assert_eq!(
            outcome.matches[0].transaction_id,
            snapshot.transactions[0].id
        );
    }

    #[test]
    fn test_claimed_transaction_cannot_match_again() {
        let snapshot = parse_ledger(&export(
            "6340 Meals,,,,,,,,,\n\
             ,02/01/2025,Expense,,Diner,,,,50.00,\n",
        ));
        let csv = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
02/01/2025,Diner,a,Meals,6340,50.00,Personal Meals,first
02/01/2025,Diner,b,Meals,6340,50.00,One-Time Event,second
";
        let exclusions = parse_exclusions(csv.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.unmatched.len(), 1);
        assert_eq!(outcome.unmatched[0].category, "One-Time Event");
        // The surviving tag is from the earlier exclusion
        let tag = outcome.tags.values().next().unwrap();
        assert_eq!(tag.category, TagCategory::Personal);
    }

    #[test]
    fn test_amount_tolerance() {
        let snapshot = parse_ledger(&export(
            "6340 Meals,,,,,,,,,\n\
             ,02/01/2025,Expense,,Diner,,,,50.01,\n",
        ));
        let csv = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
02/01/2025,Diner,a,Meals,6340,50.00,Personal Meals,rounding
";
        let exclusions = parse_exclusions(csv.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);
        assert_eq!(outcome.matches.len(), 1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let snapshot = sample_snapshot();
        let exclusions = parse_exclusions(EXCLUSIONS_CSV.as_bytes()).unwrap();

        let first = reconcile(&exclusions, &snapshot);
        let second = reconcile(&exclusions, &snapshot);

        let keys: Vec<_> = first.tags.keys().collect();
        assert_eq!(keys, second.tags.keys().collect::<Vec<_>>());
        for (id, tag) in &first.tags {
            let other = &second.tags[id];
            assert_eq!(tag.category, other.category);
            assert_eq!(tag.sub_account, other.sub_account);
        }
    }

    #[test]
    fn test_tagged_amount_disappears_from_rollup_but_not_list() {
        let snapshot = sample_snapshot();
        let exclusions = parse_exclusions(EXCLUSIONS_CSV.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);

        let rollup = monthly_amounts("6340", &snapshot, &outcome.tags);
        // Only the second 02/01 transaction (unclaimed) remains
        assert_eq!(rollup.monthly_amounts["2025-02"], Money::from_cents(5000));
        assert_eq!(snapshot.transactions.len(), 3);
    }

    #[test]
    fn test_unmatched_exclusion_is_nonfatal() {
        let snapshot = sample_snapshot();
        let csv = "\
Date,Vendor,Memo,Account,Code,Amount,Category,Justification
03/01/2025,Ghost,none,Meals,6340,999.00,Personal Meals,no such txn
";
        let exclusions = parse_exclusions(csv.as_bytes()).unwrap();
        let outcome = reconcile(&exclusions, &snapshot);
        assert!(outcome.tags.is_empty());
        assert_eq!(outcome.unmatched.len(), 1);
    }

    #[test]
    fn test_missing_exclusion_file_is_classified() {
        let err = parse_exclusions_file("/nonexistent/exclusions.csv").unwrap_err();
        assert!(matches!(err, PnlError::Reconciliation(_)));
    }
}
