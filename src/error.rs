//! Custom error types for pnlview
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Individual malformed ledger lines are never
//! errors (the parser skips them); these variants classify whole-operation
//! failures only.

use thiserror::Error;

/// The main error type for pnlview operations
#[derive(Error, Debug)]
pub enum PnlError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading errors (exclusion dataset)
    #[error("CSV error: {0}")]
    Csv(String),

    /// Whole-ingestion failures (e.g. ledger source unavailable)
    #[error("Ingestion error: {0}")]
    Ingest(String),

    /// Exclusion reconciliation errors
    #[error("Reconciliation error: {0}")]
    Reconciliation(String),

    /// Tag overlay persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PnlError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PnlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PnlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for PnlError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for pnlview operations
pub type PnlResult<T> = Result<T, PnlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PnlError::Ingest("source unavailable".into());
        assert_eq!(err.to_string(), "Ingestion error: source unavailable");
    }

    #[test]
    fn test_not_found_error() {
        let err = PnlError::account_not_found("4000");
        assert_eq!(err.to_string(), "Account not found: 4000");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let pnl_err: PnlError = io_err.into();
        assert!(matches!(pnl_err, PnlError::Io(_)));
    }
}
