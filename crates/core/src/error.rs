//! Error types for tabstore.

use thiserror::Error;

/// Result type for tabstore operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur in tabstore.
#[derive(Debug, Error)]
pub enum GridError {
    /// Remote call returned a non-success status.
    #[error("Remote error: HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// Transport-level failure before any response was produced.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-blank row without a value in the key column.
    #[error("Tab '{tab}' row {row}: missing key column '{key}'")]
    MissingKeyColumn { tab: String, row: u64, key: String },

    /// Record header does not match the stored table header.
    #[error("Header mismatch for tab '{tab}': expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        tab: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Assignment to a column the record does not declare.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Key column unset on create or update.
    #[error("Key column '{0}' must be set")]
    MissingKey(String),

    /// Row position invalid for the requested operation.
    #[error("Row must be {expected} to {operation}, got {got}")]
    RowPosition {
        expected: &'static str,
        operation: &'static str,
        got: u64,
    },

    /// Append response did not confirm that any ranges were updated.
    #[error("Append response missing update confirmation")]
    AppendUnconfirmed,

    /// Update addressed a remote row the store does not hold.
    #[error("No stored row at remote position {0}")]
    RowNotFound(u64),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    /// Create a remote error from a status code and response body.
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Create a row position error for an operation requiring `row == 0`.
    pub fn row_not_new(operation: &'static str, got: u64) -> Self {
        Self::RowPosition {
            expected: "0",
            operation,
            got,
        }
    }

    /// Create a row position error for an operation requiring `row > 0`.
    pub fn row_not_persisted(operation: &'static str) -> Self {
        Self::RowPosition {
            expected: "> 0",
            operation,
            got: 0,
        }
    }
}
