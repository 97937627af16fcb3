//! Money type for representing ledger amounts
//!
//! Internally stores amounts in cents (i64) so that summation across thousands
//! of line items is exact and independent of iteration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a signed monetary amount stored as cents
///
/// Ledger sign convention: revenue positive, expenses and contra-revenue
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount from a ledger export field
    ///
    /// Strips `$`, thousands commas, and stray quote characters. Blank or
    /// unparseable input yields zero: the export is heterogeneous and a bad
    /// amount cell must never abort ingestion.
    ///
    /// Accepts formats: "1,500.00", "-300.5", "$42", "" (zero)
    ///
    /// The whole cleaned string must be numeric: a numeric prefix with
    /// trailing text ("5abc") or a second decimal point ("1.2.3") rejects to
    /// zero rather than prefix-parsing, so a half-garbled cell never
    /// contributes a partial amount to a total.
    pub fn parse_lenient(s: &str) -> Self {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | '"'))
            .collect();
        let cleaned = cleaned.trim();

        if cleaned.is_empty() || !cleaned.is_ascii() {
            return Self::zero();
        }

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned),
        };

        let mut parts = unsigned.splitn(2, '.');
        let dollars_str = parts.next().unwrap_or("");
        let cents_str = parts.next().unwrap_or("");

        let dollars: i64 = if dollars_str.is_empty() {
            0
        } else {
            match dollars_str.parse() {
                Ok(d) => d,
                Err(_) => return Self::zero(),
            }
        };

        // Pad or truncate the fractional part to 2 digits
        let cents: i64 = if cents_str.is_empty() {
            0
        } else {
            let take = &cents_str[..cents_str.len().min(2)];
            match take.parse::<i64>() {
                Ok(c) if take.len() == 1 => c * 10,
                Ok(c) => c,
                Err(_) => return Self::zero(),
            }
        };

        let total = dollars * 100 + cents;
        Self(if negative { -total } else { total })
    }

    /// Format in accounting style: whole dollars with thousands separators,
    /// negatives in parentheses. Matches the presentation convention of the
    /// rendered P&L.
    pub fn format_accounting(&self) -> String {
        let rounded = (self.0.abs() + 50) / 100;
        let formatted = format!("${}", group_thousands(rounded));
        if self.is_negative() {
            format!("({})", formatted)
        } else {
            formatted
        }
    }
}

/// Insert thousands separators into a non-negative integer
fn group_thousands(mut n: i64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    let mut out = n.to_string();
    for group in groups.iter().rev() {
        out.push(',');
        out.push_str(group);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
