//! Case Key Derivation and Grouping

use crate::error::FeatureError;
use case_table::{Dataset, Record};
use std::collections::HashMap;
use tracing::debug;

/// Key components, in the order they appear in a case key
pub const KEY_COLUMNS: [&str; 3] = ["FACILITY_ID", "CLIENT_ID", "HOME_RMVL_KEY"];

/// Join the facility, client and removal key of a row with `_`.
///
/// A null component renders as an empty segment.
pub fn derive_case_key(record: &Record<'_>) -> Result<String, FeatureError> {
    let mut parts = Vec::with_capacity(KEY_COLUMNS.len());
    for column in KEY_COLUMNS {
        parts.push(record.require(column)?.to_string());
    }
    Ok(parts.join("_"))
}

/// Rows of a dataset grouped by case key
#[derive(Debug, Clone, Default)]
pub struct CaseGroups {
    /// Distinct keys in first-appearance order
    keys: Vec<String>,
    /// Row positions belonging to each key, parallel to `keys`
    members: Vec<Vec<usize>>,
    /// Key of every raw row
    row_keys: Vec<String>,
    /// Key to group position
    index: HashMap<String, usize>,
}

impl CaseGroups {
    /// Derive the key of every row and group rows by it
    pub fn build(dataset: &Dataset) -> Result<Self, FeatureError> {
        for column in KEY_COLUMNS {
            dataset.column_index(column)?;
        }

        let mut groups = Self::default();
        for (row, record) in dataset.records().enumerate() {
            let key = derive_case_key(&record)?;
            let slot = match groups.index.get(&key) {
                Some(&slot) => slot,
                None => {
                    groups.keys.push(key.clone());
                    groups.members.push(Vec::new());
                    groups.index.insert(key.clone(), groups.keys.len() - 1);
                    groups.keys.len() - 1
                }
            };
            groups.members[slot].push(row);
            groups.row_keys.push(key);
        }

        debug!(
            "Grouped {} rows into {} cases",
            groups.row_keys.len(),
            groups.keys.len()
        );
        Ok(groups)
    }

    /// Distinct case keys in first-appearance order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of distinct cases
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no cases
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Case key of every raw row, in row order
    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    /// Iterate `(key, row positions)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keys
            .iter()
            .zip(self.members.iter())
            .map(|(key, rows)| (key.as_str(), rows.as_slice()))
    }

    /// Row positions of one case
    pub fn rows_of(&self, key: &str) -> Option<&[usize]> {
        self.index.get(key).map(|&slot| self.members[slot].as_slice())
    }
}
