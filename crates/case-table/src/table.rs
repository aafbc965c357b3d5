//! Row-Oriented Table

use crate::error::TableError;
use crate::value::Value;
use serde::Serialize;

/// Ordered columns with positional rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of a single row
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    /// Look up a cell, failing when the column does not exist
    pub fn require(&self, column: &str) -> Result<&'a Value, TableError> {
        self.get(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))
    }

    /// Positional cell values
    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Table {
    /// Create an empty table with the given header
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self, TableError> {
        let mut names: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if names.contains(&column) {
                return Err(TableError::DuplicateColumn(column));
            }
            names.push(column);
        }
        Ok(Self {
            columns: names,
            rows: Vec::new(),
        })
    }

    /// Build a table from per-row `(column, value)` lists.
    ///
    /// Columns are the union of all names in first-seen order; cells a row
    /// does not mention are `Null`.
    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut sparse: Vec<Vec<(usize, Value)>> = Vec::new();

        for record in records {
            let mut cells = Vec::new();
            for (name, value) in record {
                let name = name.into();
                let idx = match columns.iter().position(|c| *c == name) {
                    Some(idx) => idx,
                    None => {
                        columns.push(name);
                        columns.len() - 1
                    }
                };
                cells.push((idx, value));
            }
            sparse.push(cells);
        }

        let width = columns.len();
        let rows = sparse
            .into_iter()
            .map(|cells| {
                let mut row = vec![Value::Null; width];
                for (idx, value) in cells {
                    row[idx] = value;
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowArity {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Row view by position
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows as records
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Single cell by row position and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Return a new table with `name` appended, or replaced when it already
    /// exists. `self` is left untouched.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table, TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::RowArity {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let mut derived = self.clone();
        match derived.columns.iter().position(|c| c == name) {
            Some(idx) => {
                for (row, value) in derived.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                derived.columns.push(name.to_string());
                for (row, value) in derived.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(derived)
    }

    /// Rename every column through `f`
    pub fn rename_columns<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        self.columns = self.columns.iter().map(|c| f(c)).collect();
    }

    /// Consume the table into header and rows
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }
}
