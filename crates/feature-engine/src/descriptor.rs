//! Feature Descriptors

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary computed for a feature column within each case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AggregationKind {
    /// Count of non-null cells
    Total,
    /// Arithmetic mean of numeric cells
    Average,
    /// Per-category occurrence counts
    Dummy,
    /// Sum of numeric cells
    Sum,
}

impl AggregationKind {
    /// All recognised kinds
    pub const ALL: [AggregationKind; 4] = [
        AggregationKind::Total,
        AggregationKind::Average,
        AggregationKind::Dummy,
        AggregationKind::Sum,
    ];

    /// Configuration tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::Total => "total",
            AggregationKind::Average => "average",
            AggregationKind::Dummy => "dummy",
            AggregationKind::Sum => "sum",
        }
    }
}

impl FromStr for AggregationKind {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FeatureError::InvalidAggregationKind {
                kind: s.to_string(),
            })
    }
}

impl TryFrom<String> for AggregationKind {
    type Error = FeatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature column paired with the aggregation applied to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    name: String,
    calculate: AggregationKind,
}

impl FeatureDescriptor {
    /// Create a descriptor from a configuration tag, rejecting unknown kinds
    pub fn new(name: impl Into<String>, calculate: &str) -> Result<Self, FeatureError> {
        Ok(Self::with_kind(name, calculate.parse()?))
    }

    /// Create a descriptor from an already-typed kind
    pub fn with_kind(name: impl Into<String>, calculate: AggregationKind) -> Self {
        Self {
            name: name.into(),
            calculate,
        }
    }

    /// Source column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregation kind
    pub fn kind(&self) -> AggregationKind {
        self.calculate
    }
}

impl fmt::Display for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_kinds() {
        for tag in ["total", "average", "dummy", "sum"] {
            let descriptor = FeatureDescriptor::new("RMVL_LOS", tag).unwrap();
            assert_eq!(descriptor.kind().as_str(), tag);
            assert_eq!(descriptor.name(), "RMVL_LOS");
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = FeatureDescriptor::new("RMVL_LOS", "median").unwrap_err();
        assert_eq!(
            err,
            FeatureError::InvalidAggregationKind {
                kind: "median".to_string()
            }
        );
        // Tags are case-sensitive
        assert!(FeatureDescriptor::new("RMVL_LOS", "Average").is_err());
    }

    #[test]
    fn test_display_is_name() {
        let descriptor = FeatureDescriptor::with_kind("GENDER", AggregationKind::Dummy);
        assert_eq!(descriptor.to_string(), "GENDER");
    }

    #[test]
    fn test_deserialize_validates_kind() {
        let ok: FeatureDescriptor =
            serde_json::from_str(r#"{"name": "GENDER", "calculate": "dummy"}"#).unwrap();
        assert_eq!(ok.kind(), AggregationKind::Dummy);

        let bad = serde_json::from_str::<FeatureDescriptor>(
            r#"{"name": "GENDER", "calculate": "mode"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&AggregationKind::Average).unwrap();
        assert_eq!(json, "\"average\"");
    }
}
