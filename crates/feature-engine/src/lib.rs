//! Feature Aggregation Engine
//!
//! Collapses per-record placement data into one row per case, computing a
//! configurable summary per feature column and appending a binary outcome.

mod aggregate;
mod catalogue;
mod descriptor;
mod engine;
mod error;
mod grouping;
mod outcome;

pub use aggregate::FeatureTable;
pub use catalogue::{Catalogue, CatalogueEntry, CatalogueSpec, CAUSES};
pub use descriptor::{AggregationKind, FeatureDescriptor};
pub use engine::{normalize_column_name, AggregationEngine, EngineConfig};
pub use error::FeatureError;
pub use grouping::{derive_case_key, CaseGroups, KEY_COLUMNS};
pub use outcome::{compute_outcome, OutcomeReduction};

/// Name of the derived case key column
pub const UNIQUE_ID: &str = "unique_id";

/// Name of the appended label column
pub const OUTCOME: &str = "outcome";

/// Raw column holding a case's final status
pub const DESIRABILITY_SPELL: &str = "desirability_spell";

#[cfg(test)]
mod proptests;
