//! Tagging system
//!
//! A tag marks a transaction as excluded from computed totals without touching
//! the transaction itself. The overlay is keyed by transaction id with at most
//! one tag per transaction; sub-account labels are user-extensible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::transaction::TransactionId;

/// Tag category, the coarse reason a transaction is excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagCategory {
    /// Owner-personal spending routed through the business
    Personal,
    /// One-time items that distort run-rate views
    NonRecurring,
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "personal"),
            Self::NonRecurring => write!(f, "non-recurring"),
        }
    }
}

impl std::str::FromStr for TagCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "nonrecurring" | "non-recurring" => Ok(Self::NonRecurring),
            _ => Err(format!("Unknown tag category: {}", s)),
        }
    }
}

/// A tag on a single transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Coarse category
    pub category: TagCategory,

    /// Free-text sub-account label (e.g. "Personal Meals")
    pub sub_account: String,

    /// When the tag was created
    pub tagged_at: DateTime<Utc>,
}

impl Tag {
    /// Create a tag stamped with the current time
    pub fn new(category: TagCategory, sub_account: impl Into<String>) -> Self {
        Self {
            category,
            sub_account: sub_account.into(),
            tagged_at: Utc::now(),
        }
    }
}

/// The tag overlay: transaction id -> tag
///
/// An ordered map so that serialization and iteration are deterministic.
pub type TagOverlay = BTreeMap<TransactionId, Tag>;

/// User-extensible sub-account label lists, persisted independently of the
/// overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagConfig {
    /// Labels offered for personal tags
    pub personal: Vec<String>,

    /// Labels offered for non-recurring tags
    pub non_recurring: Vec<String>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            personal: vec![
                "Personal Meals".to_string(),
                "Personal Travel".to_string(),
                "Discretionary".to_string(),
            ],
            non_recurring: vec![
                "One-Time Legal".to_string(),
                "One-Time Consulting".to_string(),
                "Non-Recurring Other".to_string(),
            ],
        }
    }
}

impl TagConfig {
    /// Labels for a category
    pub fn labels(&self, category: TagCategory) -> &[String] {
        match category {
            TagCategory::Personal => &self.personal,
            TagCategory::NonRecurring => &self.non_recurring,
        }
    }

    /// Add a sub-account label; returns false if it already exists
    pub fn add_sub_account(&mut self, category: TagCategory, label: impl Into<String>) -> bool {
        let label = label.into();
        let list = match category {
            TagCategory::Personal => &mut self.personal,
            TagCategory::NonRecurring => &mut self.non_recurring,
        };
        if list.iter().any(|l| l == &label) {
            false
        } else {
            list.push(label);
            true
        }
    }
}
