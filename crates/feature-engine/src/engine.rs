//! Case Table Assembly

use crate::aggregate::{self, FeatureTable};
use crate::descriptor::FeatureDescriptor;
use crate::error::FeatureError;
use crate::grouping::CaseGroups;
use crate::outcome::{compute_outcome, OutcomeReduction};
use crate::{DESIRABILITY_SPELL, OUTCOME, UNIQUE_ID};
use case_table::{Dataset, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Status counted as a positive outcome (first letter is capitalised)
    pub desirability: String,
    /// How row outcomes collapse into one label per case
    pub outcome_reduction: OutcomeReduction,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            desirability: "good".to_string(),
            outcome_reduction: OutcomeReduction::Last,
        }
    }
}

/// Lowercase a column name and replace spaces with underscores
pub fn normalize_column_name(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// Turns a raw per-record dataset into one row per case
pub struct AggregationEngine {
    /// Raw records, never modified
    data: Dataset,
    /// Features to aggregate, in output order
    descriptors: Vec<FeatureDescriptor>,
    /// Outcome settings
    config: EngineConfig,
}

impl AggregationEngine {
    /// Create an engine over a dataset with the default configuration
    pub fn new(data: Dataset, descriptors: Vec<FeatureDescriptor>) -> Self {
        Self::with_config(data, descriptors, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(
        data: Dataset,
        descriptors: Vec<FeatureDescriptor>,
        config: EngineConfig,
    ) -> Self {
        info!(
            "Creating aggregation engine: {} rows, {} features",
            data.len(),
            descriptors.len()
        );
        Self {
            data,
            descriptors,
            config,
        }
    }

    /// Append a feature after construction
    pub fn add_descriptor(&mut self, descriptor: FeatureDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Raw dataset
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Configured features
    pub fn descriptors(&self) -> &[FeatureDescriptor] {
        &self.descriptors
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Single-column table of distinct case keys, in first-appearance order
    pub fn build_base_table(&self) -> Result<Table, FeatureError> {
        let groups = CaseGroups::build(&self.data)?;
        Self::base_table(&groups)
    }

    /// Copy of the raw dataset with the case key attached, for inspection
    pub fn keyed_dataset(&self) -> Result<Dataset, FeatureError> {
        let groups = CaseGroups::build(&self.data)?;
        let keys = groups.row_keys().iter().cloned().map(Value::Text).collect();
        Ok(self.data.with_column(UNIQUE_ID, keys)?)
    }

    /// Aggregate one feature over every case
    pub fn aggregate(&self, descriptor: &FeatureDescriptor) -> Result<FeatureTable, FeatureError> {
        let groups = CaseGroups::build(&self.data)?;
        aggregate::aggregate(&self.data, &groups, descriptor)
    }

    /// Build the final wide table: case key, every feature's columns in
    /// descriptor order, then the outcome label
    pub fn finalize(&self) -> Result<Table, FeatureError> {
        let groups = CaseGroups::build(&self.data)?;
        self.data.column_index(DESIRABILITY_SPELL)?;

        let mut columns = vec![UNIQUE_ID.to_string()];
        let mut rows: Vec<Vec<Value>> = groups
            .keys()
            .iter()
            .map(|key| vec![Value::Text(key.clone())])
            .collect();

        for descriptor in &self.descriptors {
            info!("Aggregating {} ({})", descriptor, descriptor.kind());
            let feature = aggregate::aggregate(&self.data, &groups, descriptor)?;
            Self::left_join(&mut rows, groups.keys(), &feature);
            columns.extend(feature.columns().iter().cloned());
        }
        debug!("Joined {} feature columns", columns.len() - 1);

        let mut columns = dedupe(columns.iter().map(|c| normalize_column_name(c)).collect());
        columns.push(OUTCOME.to_string());

        for (row, label) in rows.iter_mut().zip(self.case_outcomes(&groups)?) {
            row.push(Value::Integer(i64::from(label)));
        }

        let mut table = Table::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }

        info!(
            "Finalized {} cases x {} columns",
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }

    fn base_table(groups: &CaseGroups) -> Result<Table, FeatureError> {
        let mut table = Table::new([UNIQUE_ID])?;
        for key in groups.keys() {
            table.push_row(vec![Value::Text(key.clone())])?;
        }
        Ok(table)
    }

    /// Append a feature's values to every base row; cases the feature has no
    /// row for get nulls
    fn left_join(rows: &mut [Vec<Value>], keys: &[String], feature: &FeatureTable) {
        let width = feature.columns().len();
        for (row, key) in rows.iter_mut().zip(keys) {
            match feature.row(key) {
                Some(values) => row.extend_from_slice(values),
                None => row.extend(std::iter::repeat(Value::Null).take(width)),
            }
        }
    }

    /// Label every raw row, then reduce per case in key order
    fn case_outcomes(&self, groups: &CaseGroups) -> Result<Vec<u8>, FeatureError> {
        let labels = self
            .data
            .records()
            .map(|record| compute_outcome(&record, &self.config.desirability))
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(groups
            .iter()
            .map(|(_, members)| {
                self.config
                    .outcome_reduction
                    .reduce(members.iter().map(|&r| labels[r]))
            })
            .collect())
    }
}

/// Suffix repeated names with `_2`, `_3`, ... so every column is unique.
/// The outcome column name is reserved.
fn dedupe(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::from([OUTCOME.to_string()]);
    columns
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let mut n = 2;
            loop {
                let candidate = format!("{}_{}", name, n);
                if seen.insert(candidate.clone()) {
                    warn!("Duplicate column {} renamed to {}", name, candidate);
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}
