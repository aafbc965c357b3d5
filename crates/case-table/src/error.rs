//! Table Error Types

use thiserror::Error;

/// Errors raised while building or reading tables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Referenced column is not present
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Row or column length does not match the table shape
    #[error("Row arity mismatch: expected {expected} values, got {actual}")]
    RowArity { expected: usize, actual: usize },

    /// Column name declared twice in a header
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}
