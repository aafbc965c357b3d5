//! Outcome Labelling

use crate::error::FeatureError;
use crate::DESIRABILITY_SPELL;
use case_table::{Record, Value};
use serde::{Deserialize, Serialize};

/// How per-row outcomes collapse into one label per case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeReduction {
    /// Label of the case's first row in input order, as a base table built
    /// by dropping duplicate keys would align it
    First,
    /// Label of the case's last row in input order (its final status)
    #[default]
    Last,
    /// 1 when any row of the case matches
    Any,
}

impl OutcomeReduction {
    /// Reduce the row labels of one case
    pub fn reduce(&self, labels: impl IntoIterator<Item = u8>) -> u8 {
        match self {
            OutcomeReduction::First => labels.into_iter().next().unwrap_or(0),
            OutcomeReduction::Last => labels.into_iter().last().unwrap_or(0),
            OutcomeReduction::Any => u8::from(labels.into_iter().any(|l| l == 1)),
        }
    }
}

/// Label a raw row: 1 when its `desirability_spell` equals `desirability`
/// with the first letter upper-cased, else 0.
///
/// Only the comparison value is capitalised; the row value must match
/// exactly.
pub fn compute_outcome(record: &Record<'_>, desirability: &str) -> Result<u8, FeatureError> {
    let target = capitalize(desirability)?;
    let spell = record.require(DESIRABILITY_SPELL)?;
    Ok(match spell {
        Value::Text(s) if *s == target => 1,
        _ => 0,
    })
}

fn capitalize(s: &str) -> Result<String, FeatureError> {
    let mut chars = s.chars();
    let first = chars.next().ok_or(FeatureError::EmptyDesirability)?;
    Ok(first.to_uppercase().chain(chars).collect())
}
