//! Full P&L statement: every section's rows with month columns
//!
//! The statement is the structured output handed to presentation
//! collaborators; the terminal and CSV renderings here are the crate's own
//! thin views over it.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{PnlError, PnlResult};
use crate::ledger::LedgerSnapshot;
use crate::models::{Money, Section, TagOverlay};

use super::pl_rows::{build_pl_rows, section_monthly_total, section_period_total, PlRow};
use super::format_month_label;

/// One section of the statement
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    /// The section
    pub section: Section,
    /// Rows for the section's top-level accounts
    pub rows: Vec<PlRow>,
    /// Direct section total per month
    pub monthly_totals: BTreeMap<String, Money>,
    /// Direct section total over the full period
    pub period_total: Money,
}

/// The full statement
#[derive(Debug, Clone, PartialEq)]
pub struct PlStatement {
    /// Sorted distinct month keys, copied from the snapshot
    pub months: Vec<String>,
    /// Section blocks in statement order
    pub sections: Vec<SectionBlock>,
}

impl PlStatement {
    /// Build the statement for every section
    pub fn generate(snapshot: &LedgerSnapshot, overlay: &TagOverlay) -> Self {
        let sections = Section::all()
            .into_iter()
            .map(|section| Self::generate_section(section, snapshot, overlay))
            .collect();

        Self {
            months: snapshot.months.clone(),
            sections,
        }
    }

    /// Build one section's block
    pub fn generate_section(
        section: Section,
        snapshot: &LedgerSnapshot,
        overlay: &TagOverlay,
    ) -> SectionBlock {
        let monthly_totals = snapshot
            .months
            .iter()
            .map(|m| {
                (
                    m.clone(),
                    section_monthly_total(section, m, snapshot, overlay),
                )
            })
            .collect();

        SectionBlock {
            section,
            rows: build_pl_rows(section, snapshot, overlay),
            monthly_totals,
            period_total: section_period_total(section, snapshot, overlay),
        }
    }

    /// Format the statement for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let width = 30 + 13 * (self.months.len() + 1);

        output.push_str(&format!("{:<30}", "Account"));
        for month in &self.months {
            output.push_str(&format!("{:>13}", format_month_label(month)));
        }
        output.push_str(&format!("{:>13}\n", "YTD"));
        output.push_str(&"-".repeat(width));
        output.push('\n');

        for block in &self.sections {
            if block.rows.is_empty() {
                continue;
            }

            output.push_str(&format!("{}\n", block.section.label().to_uppercase()));
            for row in &block.rows {
                let name = format!("{} {}", row.account.code, row.account.name);
                output.push_str(&format!("  {:<28}", truncate(&name, 28)));
                for month in &self.months {
                    let amount = row
                        .rollup
                        .monthly_amounts
                        .get(month)
                        .copied()
                        .unwrap_or_default();
                    output.push_str(&format!("{:>13}", amount.format_accounting()));
                }
                output.push_str(&format!(
                    "{:>13}\n",
                    row.rollup.ytd_total.format_accounting()
                ));
            }

            output.push_str(&format!("  {:<28}", "Section Total:"));
            for month in &self.months {
                let total = block
                    .monthly_totals
                    .get(month)
                    .copied()
                    .unwrap_or_default();
                output.push_str(&format!("{:>13}", total.format_accounting()));
            }
            output.push_str(&format!(
                "{:>13}\n\n",
                block.period_total.format_accounting()
            ));
        }

        output
    }

    /// Export the statement as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> PnlResult<()> {
        let io_err = |e: std::io::Error| PnlError::Io(e.to_string());

        write!(writer, "Section,Code,Account").map_err(io_err)?;
        for month in &self.months {
            write!(writer, ",{}", month).map_err(io_err)?;
        }
        writeln!(writer, ",YTD").map_err(io_err)?;

        for block in &self.sections {
            for row in &block.rows {
                write!(
                    writer,
                    "{},{},{}",
                    block.section.label(),
                    row.account.code,
                    escape_csv(&row.account.name)
                )
                .map_err(io_err)?;
                for month in &self.months {
                    let amount = row
                        .rollup
                        .monthly_amounts
                        .get(month)
                        .copied()
                        .unwrap_or_default();
                    write!(writer, ",{:.2}", amount.cents() as f64 / 100.0).map_err(io_err)?;
                }
                writeln!(writer, ",{:.2}", row.rollup.ytd_total.cents() as f64 / 100.0)
                    .map_err(io_err)?;
            }
        }

        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Quote a CSV field if it contains a comma
fn escape_csv(s: &str) -> String {
    if s.contains(',') {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_ledger;

    fn export(body: &str) -> String {
        format!("A\nB\nC\nD\n\n{}", body)
    }

    fn sample_snapshot() -> LedgerSnapshot {
        parse_ledger(&export(
            "4000 Sales,,,,,,,,,\n\
             ,01/15/2025,Sale,,A,,,,1500.00,\n\
             ,02/11/2025,Sale,,B,,,,2500.00,\n\
             6000 Cost of Sales:6065 Merchant Fees,,,,,,,,,\n\
             ,01/20/2025,Fee,,P,,,,-45.00,\n",
        ))
    }

    #[test]
    fn test_generate_covers_all_sections_in_order() {
        let snapshot = sample_snapshot();
        let statement = PlStatement::generate(&snapshot, &TagOverlay::new());

        let order: Vec<Section> = statement.sections.iter().map(|b| b.section).collect();
        assert_eq!(order, Section::all());
        assert_eq!(statement.months, vec!["2025-01", "2025-02"]);
    }

    #[test]
    fn test_section_block_totals() {
        let snapshot = sample_snapshot();
        let statement = PlStatement::generate(&snapshot, &TagOverlay::new());

        let revenue = &statement.sections[0];
        assert_eq!(revenue.period_total, Money::from_cents(400000));
        assert_eq!(revenue.monthly_totals["2025-01"], Money::from_cents(150000));

        let cost_of_sales = &statement.sections[2];
        assert_eq!(cost_of_sales.period_total, Money::from_cents(-4500));
    }

    #[test]
    fn test_format_terminal_layout() {
        let snapshot = sample_snapshot();
        let statement = PlStatement::generate(&snapshot, &TagOverlay::new());
        let text = statement.format_terminal();

        assert!(text.contains("Jan 25"));
        assert!(text.contains("REVENUE"));
        assert!(text.contains("4000 Sales"));
        assert!(text.contains("$1,500"));
        // Empty sections are omitted entirely
        assert!(!text.contains("COST OF GOODS SOLD"));
    }

    #[test]
    fn test_export_csv_shape() {
        let snapshot = sample_snapshot();
        let statement = PlStatement::generate(&snapshot, &TagOverlay::new());
        let mut buf = Vec::new();
        statement.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Section,Code,Account,2025-01,2025-02,YTD"));
        assert!(text.contains("Revenue,4000,Sales,1500.00,2500.00,4000.00"));
    }
}
