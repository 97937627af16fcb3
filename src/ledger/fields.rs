//! Line-level scanning for the export format
//!
//! The export is comma-delimited with a quote-toggle rule: a double quote
//! flips an "inside quoted span" flag, and a comma only splits a field while
//! that flag is off. Section headers are detected on the raw line before any
//! field splitting, matching how the export writes them.

/// Number of leading report-metadata lines that are always skipped
pub const HEADER_LINES: usize = 5;

/// Marker prefix for running-total rows, which are ignored
pub const TOTAL_ROW_MARKER: &str = "Total for";

/// Split a line into trimmed fields with the quote-toggle rule
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Detect a section header: a label followed by exactly nine empty columns,
/// with no separators inside the label. Returns the trimmed label.
pub fn section_header_label(line: &str) -> Option<&str> {
    let rest = line.strip_suffix(",,,,,,,,,")?;
    let label = rest.trim();
    if label.is_empty() || label.contains(',') {
        return None;
    }
    Some(label)
}

/// Check the strict two-digit/two-digit/four-digit date shape (`DD/DD/DDDD`)
pub fn is_date_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && [0, 1, 3, 4, 6, 7, 8, 9]
            .iter()
            .all(|&i| b[i].is_ascii_digit())
}

/// A line consisting solely of separators (e.g. ",,,,,,,,,")
pub fn is_separator_only(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == ',')
}
