//! Per-Case Aggregations

use crate::descriptor::{AggregationKind, FeatureDescriptor};
use crate::error::FeatureError;
use crate::grouping::CaseGroups;
use case_table::{Dataset, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Aggregated values of one feature, indexed by case key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: HashMap<String, Vec<Value>>,
}

impl FeatureTable {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.insert(key.into(), values);
    }

    /// Output column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values for one case, parallel to `columns`
    pub fn row(&self, key: &str) -> Option<&[Value]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Single value for one case
    pub fn value(&self, key: &str, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(key).map(|row| &row[idx])
    }

    /// Number of cases with values
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no case has values
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Running numeric summary of one group
#[derive(Debug, Clone, Copy, Default)]
struct NumericSummary {
    count: usize,
    sum: f64,
    int_sum: i64,
    all_integer: bool,
}

impl NumericSummary {
    fn compute<'a>(
        column: &str,
        cells: impl Iterator<Item = &'a Value>,
    ) -> Result<Self, FeatureError> {
        let mut summary = Self {
            all_integer: true,
            ..Default::default()
        };
        for cell in cells {
            match cell {
                Value::Null => {}
                Value::Integer(i) => {
                    summary.count += 1;
                    summary.sum += *i as f64;
                    // Overflowing integer sums fall back to the float total
                    match summary.int_sum.checked_add(*i) {
                        Some(total) => summary.int_sum = total,
                        None => summary.all_integer = false,
                    }
                }
                Value::Float(f) => {
                    summary.count += 1;
                    summary.sum += *f;
                    summary.all_integer = false;
                }
                Value::Text(s) => {
                    return Err(FeatureError::NonNumericValue {
                        column: column.to_string(),
                        value: s.clone(),
                    })
                }
            }
        }
        Ok(summary)
    }

    fn mean(&self) -> Value {
        if self.count == 0 {
            Value::Null
        } else {
            Value::Float(self.sum / self.count as f64)
        }
    }

    fn total(&self) -> Value {
        if self.all_integer {
            Value::Integer(self.int_sum)
        } else {
            Value::Float(self.sum)
        }
    }
}

/// Compute the aggregate a descriptor asks for over every case
pub fn aggregate(
    dataset: &Dataset,
    groups: &CaseGroups,
    descriptor: &FeatureDescriptor,
) -> Result<FeatureTable, FeatureError> {
    let column = descriptor.name();
    let cells = dataset.column(column)?;

    match descriptor.kind() {
        AggregationKind::Total => {
            let mut table = FeatureTable::new(vec![format!("{}_count", column)]);
            for (key, rows) in groups.iter() {
                let count = rows.iter().filter(|&&r| !cells[r].is_null()).count();
                table.insert(key, vec![Value::Integer(count as i64)]);
            }
            Ok(table)
        }
        AggregationKind::Average => numeric(&cells, groups, column, "avg", NumericSummary::mean),
        AggregationKind::Sum => numeric(&cells, groups, column, "sum", NumericSummary::total),
        AggregationKind::Dummy => Ok(crosstab(&cells, groups, column)),
    }
}

fn numeric(
    cells: &[&Value],
    groups: &CaseGroups,
    column: &str,
    suffix: &str,
    reduce: fn(&NumericSummary) -> Value,
) -> Result<FeatureTable, FeatureError> {
    let mut table = FeatureTable::new(vec![format!("{}_{}", column, suffix)]);
    for (key, rows) in groups.iter() {
        let summary = NumericSummary::compute(column, rows.iter().map(|&r| cells[r]))?;
        table.insert(key, vec![reduce(&summary)]);
    }
    Ok(table)
}

fn same_category(a: &Value, b: &Value) -> bool {
    a.total_cmp(b) == Ordering::Equal
}

/// Cross-tabulate a categorical column: one count column per distinct value.
/// Numerically equal integers and floats share a category.
fn crosstab(cells: &[&Value], groups: &CaseGroups, column: &str) -> FeatureTable {
    let mut categories: Vec<&Value> = Vec::new();
    for cell in cells.iter().copied().filter(|c| !c.is_null()) {
        if !categories.iter().any(|c| same_category(c, cell)) {
            categories.push(cell);
        }
    }
    categories.sort_by(|a, b| a.total_cmp(b));

    let labels: Vec<String> = categories.iter().map(|v| v.to_string()).collect();
    let mut table = FeatureTable::new(
        labels
            .iter()
            .map(|label| format!("{}_{}", column, label))
            .collect(),
    );

    for (key, rows) in groups.iter() {
        let mut counts = vec![0i64; categories.len()];
        for &r in rows {
            if let Some(pos) = categories.iter().position(|c| same_category(c, cells[r])) {
                counts[pos] += 1;
            }
        }
        table.insert(key, counts.into_iter().map(Value::Integer).collect());
    }
    table
}
