//! Feature Catalogue
//!
//! Ordered set of feature descriptors built from static configuration.

use crate::descriptor::{AggregationKind, FeatureDescriptor};
use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Removal causes and facility attributes, each counted per case
pub const CAUSES: &[&str] = &[
    "Abandonment",
    "Alcohol Use/Abuse - Caretaker",
    "Alcohol Use/Abuse - Child",
    "Death of Parent(s)",
    "Domestic Violence",
    "Drug Use/Abuse - Caretaker",
    "Drug Use/Abuse - Child",
    "Incarceration of Parent/Guardian(s)",
    "JPO Removal (Child's Behavior Problem)",
    "Mental/Emotional Injuries",
    "Neglect - educational needs",
    "Neglect - hygiene/clothing needs",
    "Neglect - medical needs",
    "Neglect - No/Inadequate Housing",
    "Neglect - nutritional needs",
    "Neglect - supervision and safety needs",
    "Parent's inability to cope",
    "Parent lacks skills for providing care",
    "Parent not seeking BH treatment",
    "Parent not seeking BH treatmnt for child",
    "Parent/Child Conflict",
    "Parent/Guardian lacks skills to provide",
    "Physical Abuse",
    "Relinquishment",
    "Resumption",
    "Sexual Abuse",
    "Truancy",
    "Provider.Type",
    "Capacity",
    "Willing.to.Adopt",
    "Gender.Served",
    "Age.Range.Served",
    "lower_age_served",
    "upper_age_served",
    "Family Foster Care",
    "Foster Care",
    "Group Home",
    "Non-Relative/Kinship",
    "Non-Relative/Non-Kinship",
    "Pre-Adoptive",
    "Pre-Adoptive Home",
    "Pre-Adoptive Teen Mother with Non-Dependent Child",
    "Regular",
    "Regular Teen Mother with Non-Dependent Child",
    "Regular Teen Mother with Two Dependent Children",
    "Relative/Kinship",
    "Residential",
    "Residential / Institution",
    "Residential Treatment Facility (RTF)",
    "RTF Room and Board",
    "Shelter",
    "Shelter Teen Mother with Non-Dependent Child",
    "Teen Family Foster Care (ages 12-21 years)",
    "Teen mother with 2 non-dependent children",
    "Teen Mother with 2 Non-Dependent Children",
    "Teen mother with non-dependent child",
    "Teen Parent Family Foster Care (ages 12-21) plus one non-dependent child",
    "Therapeutic Foster Care",
];

/// Column to aggregation mapping of the stock catalogue, in insertion order.
/// NUM_SPELLS and NUM_MOVES are respecified; the last kind wins.
const FEATURES: &[(&str, AggregationKind)] = &[
    ("RMVL_LOS", AggregationKind::Average),
    ("CASE_REF_ID", AggregationKind::Total),
    ("CLIENT_ID", AggregationKind::Total),
    ("GENDER", AggregationKind::Dummy),
    ("RACE_GROUP", AggregationKind::Dummy),
    ("RMVL_TYPE", AggregationKind::Dummy),
    ("RMVL_AGE", AggregationKind::Total),
    ("PLCMNT_TYPE", AggregationKind::Dummy),
    ("TYPE_PLACEMENT", AggregationKind::Dummy),
    ("ANALYSIS_CARETYPE", AggregationKind::Dummy),
    ("NUM_SPELLS", AggregationKind::Average),
    ("NUM_MOVES", AggregationKind::Average),
    ("NUM_SPELLS", AggregationKind::Total),
    ("NUM_MOVES", AggregationKind::Total),
    ("NUM_SPELLS", AggregationKind::Sum),
    ("NUM_MOVES", AggregationKind::Sum),
];

/// One `column = kind` line of a catalogue file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub column: String,
    pub calculate: String,
}

/// Serialized catalogue: explicit features first, then causes counted with
/// `total`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSpec {
    #[serde(default)]
    pub features: Vec<CatalogueEntry>,
    #[serde(default)]
    pub causes: Vec<String>,
}

/// Ordered feature descriptors with one entry per column.
///
/// Re-inserting a column keeps its original position and replaces its kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    descriptors: Vec<FeatureDescriptor>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock child-welfare catalogue
    pub fn child_welfare() -> Self {
        let mut catalogue = Self::new();
        for (column, kind) in FEATURES {
            catalogue.insert(*column, *kind);
        }
        for cause in CAUSES {
            catalogue.insert(*cause, AggregationKind::Total);
        }
        catalogue
    }

    /// Insert or respecify a column
    pub fn insert(&mut self, column: impl Into<String>, kind: AggregationKind) {
        let column = column.into();
        match self.descriptors.iter().position(|d| d.name() == column) {
            Some(idx) => {
                debug!(
                    "Respecifying {} from {} to {}",
                    column,
                    self.descriptors[idx].kind(),
                    kind
                );
                self.descriptors[idx] = FeatureDescriptor::with_kind(column, kind);
            }
            None => self
                .descriptors
                .push(FeatureDescriptor::with_kind(column, kind)),
        }
    }

    /// Insert a column from a configuration tag
    pub fn insert_tag(&mut self, column: impl Into<String>, calculate: &str) -> Result<(), FeatureError> {
        let kind = calculate.parse()?;
        self.insert(column, kind);
        Ok(())
    }

    /// Build from a serialized spec, failing on the first unknown kind
    pub fn from_spec(spec: &CatalogueSpec) -> Result<Self, FeatureError> {
        let mut catalogue = Self::new();
        for entry in &spec.features {
            catalogue.insert_tag(entry.column.clone(), &entry.calculate)?;
        }
        for cause in &spec.causes {
            catalogue.insert(cause.clone(), AggregationKind::Total);
        }
        Ok(catalogue)
    }

    /// Descriptors in order
    pub fn descriptors(&self) -> &[FeatureDescriptor] {
        &self.descriptors
    }

    /// Kind configured for a column
    pub fn kind_of(&self, column: &str) -> Option<AggregationKind> {
        self.descriptors
            .iter()
            .find(|d| d.name() == column)
            .map(FeatureDescriptor::kind)
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalogue is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Consume into the descriptor list
    pub fn into_descriptors(self) -> Vec<FeatureDescriptor> {
        self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_kind_wins_first_position_kept() {
        let mut catalogue = Catalogue::new();
        catalogue.insert("NUM_SPELLS", AggregationKind::Average);
        catalogue.insert("GENDER", AggregationKind::Dummy);
        catalogue.insert("NUM_SPELLS", AggregationKind::Sum);

        let names: Vec<&str> = catalogue.descriptors().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["NUM_SPELLS", "GENDER"]);
        assert_eq!(catalogue.kind_of("NUM_SPELLS"), Some(AggregationKind::Sum));
    }

    #[test]
    fn test_child_welfare_catalogue() {
        let catalogue = Catalogue::child_welfare();

        // 12 distinct feature columns plus every cause (CLIENT_ID is not a cause)
        assert_eq!(catalogue.len(), 12 + CAUSES.len());
        assert_eq!(catalogue.descriptors()[0].name(), "RMVL_LOS");
        assert_eq!(catalogue.kind_of("RMVL_LOS"), Some(AggregationKind::Average));
        assert_eq!(catalogue.kind_of("GENDER"), Some(AggregationKind::Dummy));
        assert_eq!(catalogue.kind_of("NUM_SPELLS"), Some(AggregationKind::Sum));
        assert_eq!(catalogue.kind_of("NUM_MOVES"), Some(AggregationKind::Sum));
        assert_eq!(catalogue.kind_of("Physical Abuse"), Some(AggregationKind::Total));
        assert_eq!(
            catalogue.descriptors().last().map(|d| d.name()),
            Some("Therapeutic Foster Care")
        );
    }

    #[test]
    fn test_from_spec() {
        let spec = CatalogueSpec {
            features: vec![
                CatalogueEntry {
                    column: "RMVL_LOS".to_string(),
                    calculate: "average".to_string(),
                },
                CatalogueEntry {
                    column: "RMVL_LOS".to_string(),
                    calculate: "sum".to_string(),
                },
            ],
            causes: vec!["Truancy".to_string()],
        };
        let catalogue = Catalogue::from_spec(&spec).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.kind_of("RMVL_LOS"), Some(AggregationKind::Sum));
        assert_eq!(catalogue.kind_of("Truancy"), Some(AggregationKind::Total));
    }

    #[test]
    fn test_from_spec_rejects_unknown_kind() {
        let spec = CatalogueSpec {
            features: vec![CatalogueEntry {
                column: "GENDER".to_string(),
                calculate: "onehot".to_string(),
            }],
            causes: Vec::new(),
        };
        assert_eq!(
            Catalogue::from_spec(&spec).unwrap_err(),
            FeatureError::InvalidAggregationKind {
                kind: "onehot".to_string()
            }
        );
    }

    #[test]
    fn test_spec_from_json() {
        let spec: CatalogueSpec = serde_json::from_str(
            r#"{"features": [{"column": "GENDER", "calculate": "dummy"}]}"#,
        )
        .unwrap();
        assert!(spec.causes.is_empty());
        assert_eq!(Catalogue::from_spec(&spec).unwrap().len(), 1);
    }
}
