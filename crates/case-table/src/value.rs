//! Cell Values

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    /// Integral number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Free text or categorical label
    Text(String),
}

impl Value {
    /// Infer a value from a raw text cell (empty, integer, float, then text).
    ///
    /// Empty cells and `NaN` markers are missing; other non-finite spellings
    /// such as `inf` stay text.
    pub fn parse_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => Value::Text(raw.to_string()),
        }
    }

    /// Whether the cell is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of the cell
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text view of the cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Total order used to sort category labels: null, then numbers, then text
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Integer(_) | Value::Float(_) => 1,
                Value::Text(_) => 2,
            }
        }

        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) if rank(a) == 1 && rank(b) == 1 => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_inference() {
        assert_eq!(Value::parse_field(""), Value::Null);
        assert_eq!(Value::parse_field("  "), Value::Null);
        assert_eq!(Value::parse_field("42"), Value::Integer(42));
        assert_eq!(Value::parse_field("-3"), Value::Integer(-3));
        assert_eq!(Value::parse_field("2.5"), Value::Float(2.5));
        assert_eq!(Value::parse_field("Good"), Value::Text("Good".to_string()));
    }

    #[test]
    fn test_parse_field_non_finite() {
        assert_eq!(Value::parse_field("NaN"), Value::Null);
        assert_eq!(Value::parse_field("nan"), Value::Null);
        assert_eq!(Value::parse_field(" NAN "), Value::Null);
        assert_eq!(Value::parse_field("inf"), Value::from("inf"));
        assert_eq!(Value::parse_field("-Infinity"), Value::from("-Infinity"));
        assert_eq!(Value::parse_field("1e400"), Value::from("1e400"));
    }

    #[test]
    fn test_total_cmp_integer_float_equal() {
        assert_eq!(Value::Integer(1).total_cmp(&Value::Float(1.0)), Ordering::Equal);
        assert_eq!(Value::Float(2.0).total_cmp(&Value::Integer(1)), Ordering::Greater);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Float(15.0).to_string(), "15");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::from("Group Home").to_string(), "Group Home");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_total_cmp_orders_numbers_before_text() {
        let mut values = vec![
            Value::from("M"),
            Value::Float(2.5),
            Value::from("F"),
            Value::Integer(1),
            Value::Integer(3),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            values,
            vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Integer(3),
                Value::from("F"),
                Value::from("M"),
            ]
        );
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, 3, 1.5, "Good"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Integer(3),
                Value::Float(1.5),
                Value::from("Good"),
            ]
        );
    }
}
