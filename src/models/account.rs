//! Account model and account-path helpers
//!
//! An account is identified by its 4-digit code and derived from the section
//! headers of the export. Paths are either a single segment ("4000 Sales") or
//! a colon-joined pair ("6000 Cost of Sales:6065 Merchant Fees"); the data
//! never nests deeper than one level.

use serde::{Deserialize, Serialize};

use super::section::Section;

/// A node in the chart of accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// 4-digit account code (unique key)
    pub code: String,

    /// Display name with the code prefix stripped
    pub name: String,

    /// Full path string as it appeared in the export
    pub full_name: String,

    /// Parent account code, if this is a child account
    pub parent_code: Option<String>,

    /// Classified P&L section
    pub section: Section,

    /// Ordered child account codes (no duplicate edges)
    #[serde(default)]
    pub children: Vec<String>,

    /// 0 for top-level accounts, 1 for nested accounts
    pub depth: u8,
}

impl Account {
    /// Create a top-level account from a single path segment
    pub fn top_level(code: impl Into<String>, segment: &str) -> Self {
        let code = code.into();
        Self {
            section: Section::classify(&code),
            name: display_name(segment),
            full_name: segment.to_string(),
            parent_code: None,
            children: Vec::new(),
            depth: 0,
            code,
        }
    }

    /// Create a child account from a full two-segment path
    pub fn child(code: impl Into<String>, parent_code: impl Into<String>, full_path: &str) -> Self {
        let code = code.into();
        Self {
            section: Section::classify(&code),
            name: display_name(full_path),
            full_name: full_path.to_string(),
            parent_code: Some(parent_code.into()),
            children: Vec::new(),
            depth: 1,
            code,
        }
    }

    /// Add a child edge, ignoring duplicates
    pub fn add_child(&mut self, child_code: &str) {
        if !self.children.iter().any(|c| c == child_code) {
            self.children.push(child_code.to_string());
        }
    }
}

/// Extract the leading 4-digit code from a path segment
///
/// Returns an empty string when the segment has no leading numeral, which
/// makes the transaction unattributable to any account node.
pub fn leading_code(segment: &str) -> String {
    let bytes = segment.as_bytes();
    if bytes.len() >= 4 && bytes[..4].iter().all(|b| b.is_ascii_digit()) {
        segment[..4].to_string()
    } else {
        String::new()
    }
}

/// Derive (code, parent code) from a full account path
///
/// A single segment yields a leaf with no parent; a colon-joined pair yields
/// a child code from the last segment and a parent code from the first.
pub fn path_codes(path: &str) -> (String, Option<String>) {
    match path.split_once(':') {
        None => (leading_code(path.trim()), None),
        Some((first, rest)) => {
            let last = rest.rsplit(':').next().unwrap_or(rest).trim();
            let parent = leading_code(first.trim());
            let code = leading_code(last);
            let parent = if parent.is_empty() { None } else { Some(parent) };
            (code, parent)
        }
    }
}

/// Extract the display name from a path: last segment with the code prefix
/// removed ("6065 Merchant Fees" -> "Merchant Fees")
pub fn display_name(path: &str) -> String {
    let last = path.rsplit(':').next().unwrap_or(path).trim();
    let code = leading_code(last);
    if code.is_empty() {
        last.to_string()
    } else {
        last[4..].trim_start().to_string()
    }
}

/// First segment of a path, trimmed (used to synthesize parent stubs)
pub fn parent_segment(path: &str) -> &str {
    path.split(':').next().unwrap_or(path).trim()
}
