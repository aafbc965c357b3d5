//! Case Table
//!
//! Provides the in-memory tabular model shared by the raw dataset, the base
//! table of case keys, and the final wide table.

mod error;
mod table;
mod value;

pub use error::TableError;
pub use table::{Record, Table};
pub use value::Value;

/// The raw per-record input is an ordinary table.
pub type Dataset = Table;
