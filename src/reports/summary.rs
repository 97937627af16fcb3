//! Top-line P&L summary metrics

use std::io::Write;

use crate::error::{PnlError, PnlResult};
use crate::ledger::LedgerSnapshot;
use crate::models::{Money, Section, TagOverlay};

use super::pl_rows::section_period_total;

/// Revenue-increasing account codes contributing to gross revenue
pub const GROSS_REVENUE_CODES: [&str; 2] = ["4000", "4030"];

/// Discount/refund/chargeback codes; their sums are expected negative
pub const CONTRA_REVENUE_CODES: [&str; 3] = ["4010", "4020", "4040"];

/// Top-line summary metrics over the full period
#[derive(Debug, Clone, PartialEq)]
pub struct PlSummary {
    /// Sum over the designated revenue-increasing codes
    pub gross_revenue: Money,
    /// Sum over the discount/refund/chargeback codes (expected negative)
    pub contra_revenue: Money,
    /// Gross + contra revenue
    pub net_revenue: Money,
    /// Full-period cost-of-goods total
    pub total_cogs: Money,
    /// Full-period cost-of-sales total
    pub total_cost_of_sales: Money,
    /// Net revenue minus COGS and cost of sales
    pub gross_profit: Money,
    /// Gross profit / net revenue, in percent; 0 when net revenue is 0
    pub gross_margin: f64,
    /// Full-period operating-expense total
    pub total_opex: Money,
    /// Full-period other-income total
    pub other_income: Money,
    /// Gross profit minus opex plus other income
    pub net_income: Money,
    /// Net income / net revenue, in percent; 0 when net revenue is 0
    pub net_margin: f64,
    /// Number of tagged transactions present in the snapshot
    pub tagged_count: usize,
    /// Total amount removed from the view by tagging
    pub tagged_amount: Money,
}

impl PlSummary {
    /// Compute the summary from the snapshot and the current overlay
    pub fn generate(snapshot: &LedgerSnapshot, overlay: &TagOverlay) -> Self {
        let sum_codes = |codes: &[&str]| -> Money {
            snapshot
                .transactions
                .iter()
                .filter(|t| !overlay.contains_key(&t.id))
                .filter(|t| codes.contains(&t.account_code.as_str()))
                .map(|t| t.amount)
                .sum()
        };

        let gross_revenue = sum_codes(&GROSS_REVENUE_CODES);
        let contra_revenue = sum_codes(&CONTRA_REVENUE_CODES);
        let net_revenue = gross_revenue + contra_revenue;

        let total_cogs = section_period_total(Section::Cogs, snapshot, overlay);
        let total_cost_of_sales = section_period_total(Section::CostOfSales, snapshot, overlay);
        let total_opex = section_period_total(Section::OperatingExpenses, snapshot, overlay);
        let other_income = section_period_total(Section::OtherIncome, snapshot, overlay);

        let gross_profit = net_revenue - total_cogs - total_cost_of_sales;
        let net_income = gross_profit - total_opex + other_income;

        let (tagged_count, tagged_amount) = snapshot
            .transactions
            .iter()
            .filter(|t| overlay.contains_key(&t.id))
            .fold((0usize, Money::zero()), |(count, total), t| {
                (count + 1, total + t.amount)
            });

        Self {
            gross_revenue,
            contra_revenue,
            net_revenue,
            total_cogs,
            total_cost_of_sales,
            gross_profit,
            gross_margin: margin(gross_profit, net_revenue),
            total_opex,
            other_income,
            net_income,
            net_margin: margin(net_income, net_revenue),
            tagged_count,
            tagged_amount,
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("P&L Summary\n");
        output.push_str(&"=".repeat(44));
        output.push('\n');
        let mut line = |label: &str, value: String| {
            output.push_str(&format!("{:<24} {:>18}\n", label, value));
        };
        line("Gross Revenue", self.gross_revenue.format_accounting());
        line("Contra Revenue", self.contra_revenue.format_accounting());
        line("Net Revenue", self.net_revenue.format_accounting());
        line("COGS", self.total_cogs.format_accounting());
        line("Cost of Sales", self.total_cost_of_sales.format_accounting());
        line("Gross Profit", self.gross_profit.format_accounting());
        line("Gross Margin", format!("{:.1}%", self.gross_margin));
        line("Operating Expenses", self.total_opex.format_accounting());
        line("Other Income", self.other_income.format_accounting());
        line("Net Income", self.net_income.format_accounting());
        line("Net Margin", format!("{:.1}%", self.net_margin));
        line("Excluded Items", format!("{}", self.tagged_count));
        line("Excluded Amount", self.tagged_amount.format_accounting());

        output
    }

    /// Export the summary as CSV rows
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> PnlResult<()> {
        writeln!(writer, "Metric,Value").map_err(|e| PnlError::Io(e.to_string()))?;
        let rows: [(&str, String); 13] = [
            ("Gross Revenue", dollars(self.gross_revenue)),
            ("Contra Revenue", dollars(self.contra_revenue)),
            ("Net Revenue", dollars(self.net_revenue)),
            ("COGS", dollars(self.total_cogs)),
            ("Cost of Sales", dollars(self.total_cost_of_sales)),
            ("Gross Profit", dollars(self.gross_profit)),
            ("Gross Margin %", format!("{:.2}", self.gross_margin)),
            ("Operating Expenses", dollars(self.total_opex)),
            ("Other Income", dollars(self.other_income)),
            ("Net Income", dollars(self.net_income)),
            ("Net Margin %", format!("{:.2}", self.net_margin)),
            ("Excluded Items", self.tagged_count.to_string()),
            ("Excluded Amount", dollars(self.tagged_amount)),
        ];
        for (metric, value) in rows {
            writeln!(writer, "{},{}", metric, value).map_err(|e| PnlError::Io(e.to_string()))?;
        }
        Ok(())
    }
}

/// Percentage ratio with the divide-by-zero case defined as 0, never NaN
fn margin(numerator: Money, denominator: Money) -> f64 {
    if denominator.is_zero() {
        0.0
    } else {
        numerator.cents() as f64 / denominator.cents() as f64 * 100.0
    }
}

fn dollars(m: Money) -> String {
    let sign = if m.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, m.dollars().abs(), m.cents_part())
}
