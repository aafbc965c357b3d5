//! Feature Engine Error Types

use case_table::TableError;
use thiserror::Error;

/// Errors raised while configuring or running the aggregation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Aggregation tag outside the recognised set
    #[error("Invalid aggregation kind '{kind}': calculate method must be one of total, average, dummy, sum")]
    InvalidAggregationKind { kind: String },

    /// Referenced column absent from the dataset
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Text cell found where a numeric aggregation needs a number
    #[error("Column {column} holds non-numeric value '{value}'")]
    NonNumericValue { column: String, value: String },

    /// Target desirability for the outcome label is empty
    #[error("Desirability must not be empty")]
    EmptyDesirability,

    /// Underlying table error
    #[error(transparent)]
    Table(TableError),
}

impl From<TableError> for FeatureError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn(column) => FeatureError::MissingColumn(column),
            other => FeatureError::Table(other),
        }
    }
}
