#![deny(unsafe_code)]

//! Cell value representations used across the normalization pipeline.
//!
//! Raw input arrives as [`RawValue`], a closed set of shapes so the
//! classifier never has to reason about arbitrary dynamic values.
//! Normalization produces [`CellValue`], which adds the datetime variant
//! and the typed null sentinel.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A raw cell value as supplied by the caller, before classification.
///
/// File readers and other collaborators feed rows as `Vec<RawValue>`.
/// Already-typed variants keep their type through classification; only
/// `Text` runs the full inference battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Real(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T> From<Option<T>> for RawValue
where
    T: Into<RawValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

/// A normalized cell value.
///
/// `Null` is the typed null sentinel: "no usable value", distinct from
/// zero or empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    DateTime(DateTime<FixedOffset>),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The classification kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Null => ValueKind::Null,
            CellValue::Bool(_) => ValueKind::Bool,
            CellValue::Int(_) => ValueKind::Int,
            CellValue::Real(_) => ValueKind::Real,
            CellValue::DateTime(_) => ValueKind::DateTime,
            CellValue::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for CellValue {
    /// Canonical text rendering, used when a value widens into a text
    /// column. Integral reals print without a trailing `.0` and nulls
    /// render empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Real(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            CellValue::DateTime(value) => write!(f, "{}", value.to_rfc3339()),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// The semantic kind the classifier assigns to a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Real,
    DateTime,
    Text,
}

/// Classifier output for one cell: the inferred kind together with the
/// coerced candidate value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedValue {
    pub kind: ValueKind,
    pub value: CellValue,
}

impl ClassifiedValue {
    pub fn new(kind: ValueKind, value: CellValue) -> Self {
        Self { kind, value }
    }

    pub fn null() -> Self {
        Self {
            kind: ValueKind::Null,
            value: CellValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        self.kind == ValueKind::Null
    }
}

/// The resolved effective type of one column.
///
/// Mixed columns widen to `Text`; there is no separate "mixed" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Real,
    Boolean,
    DateTime,
    Text,
    /// Every observed value was null-like.
    NullOnly,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Boolean => "boolean",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
            ColumnType::NullOnly => "null",
        }
    }

    /// The classification kind a value of this column type carries.
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnType::Integer => ValueKind::Int,
            ColumnType::Real => ValueKind::Real,
            ColumnType::Boolean => ValueKind::Bool,
            ColumnType::DateTime => ValueKind::DateTime,
            ColumnType::Text => ValueKind::Text,
            ColumnType::NullOnly => ValueKind::Null,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    /// Parse a declared column type. Accepts the canonical names plus
    /// common synonyms, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(ColumnType::Integer),
            "real" | "float" | "double" => Ok(ColumnType::Real),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            "datetime" => Ok(ColumnType::DateTime),
            "text" | "string" | "str" => Ok(ColumnType::Text),
            "null" => Ok(ColumnType::NullOnly),
            _ => Err(format!("unknown column type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_from_str() {
        assert_eq!("integer".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("Float".parse::<ColumnType>().unwrap(), ColumnType::Real);
        assert_eq!(" BOOL ".parse::<ColumnType>().unwrap(), ColumnType::Boolean);
        assert!("decimalish".parse::<ColumnType>().is_err());
    }

    #[test]
    fn display_renders_canonical_text() {
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Real(3.0).to_string(), "3");
        assert_eq!(CellValue::Real(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Text("as is ".into()).to_string(), "as is ");
    }

    #[test]
    fn raw_value_from_option() {
        assert_eq!(RawValue::from(None::<i64>), RawValue::Null);
        assert_eq!(RawValue::from(Some(5i64)), RawValue::Int(5));
    }
}
