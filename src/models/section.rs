//! P&L section classification
//!
//! Every account classifies into exactly one section based on its 4-digit
//! numeric code. Classification is total: codes outside the documented ranges
//! fall back to operating expenses, though the parser's own section filtering
//! should already exclude non-P&L codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A section of the profit-and-loss statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Revenue accounts, codes [4000, 4100)
    Revenue,
    /// Cost of goods sold, codes [5000, 6000)
    Cogs,
    /// Cost of sales, codes [6000, 6100)
    CostOfSales,
    /// Operating expenses, codes [6100, 7000); also the fallback
    OperatingExpenses,
    /// Other income, codes [7000, 8000)
    OtherIncome,
}

impl Section {
    /// Classify an account code into a section
    ///
    /// Pure and total over any code string; non-numeric codes take the
    /// operating-expenses fallback.
    pub fn classify(code: &str) -> Self {
        let num: u32 = match code.parse() {
            Ok(n) => n,
            Err(_) => return Self::OperatingExpenses,
        };

        match num {
            4000..=4099 => Self::Revenue,
            5000..=5999 => Self::Cogs,
            6000..=6099 => Self::CostOfSales,
            6100..=6999 => Self::OperatingExpenses,
            7000..=7999 => Self::OtherIncome,
            _ => Self::OperatingExpenses,
        }
    }

    /// All sections in statement order
    pub const fn all() -> [Section; 5] {
        [
            Self::Revenue,
            Self::Cogs,
            Self::CostOfSales,
            Self::OperatingExpenses,
            Self::OtherIncome,
        ]
    }

    /// Human-readable statement heading
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Cogs => "Cost of Goods Sold",
            Self::CostOfSales => "Cost of Sales",
            Self::OperatingExpenses => "Operating Expenses",
            Self::OtherIncome => "Other Income",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "cogs" => Ok(Self::Cogs),
            "costofsales" | "cost-of-sales" => Ok(Self::CostOfSales),
            "operatingexpenses" | "opex" | "operating-expenses" => Ok(Self::OperatingExpenses),
            "otherincome" | "other-income" => Ok(Self::OtherIncome),
            _ => Err(format!("Unknown section: {}", s)),
        }
    }
}
