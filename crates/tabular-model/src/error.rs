use thiserror::Error;

use crate::ColumnType;

/// Errors surfaced at the table construction and export boundaries.
///
/// Classification itself never fails; malformed cells fall back to text.
/// Construction is all-or-nothing, so callers receive either a fully
/// normalized table or the first structural problem encountered.
#[derive(Debug, Error)]
pub enum TableError {
    /// Two header names collide after preprocessing.
    #[error("duplicate header name: {name:?}")]
    DuplicateHeader { name: String },

    /// A row's length differs from the header length under the strict
    /// shape policy.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A mapping export was requested on a table without a header.
    #[error("table has no header")]
    NoHeader,

    /// A declared type hint cannot coerce an observed value and no
    /// fallback is configured.
    #[error("column {column} is declared {hint} but holds incompatible value {value:?}")]
    UnresolvableTypeHint {
        column: String,
        hint: ColumnType,
        value: String,
    },

    /// A header name is empty after preprocessing.
    #[error("invalid header name at column {index}: {name:?}")]
    InvalidHeaderName { index: usize, name: String },

    /// The table name is empty or whitespace-only.
    #[error("invalid table name: {name:?}")]
    InvalidTableName { name: String },

    /// A column filter pattern failed to compile.
    #[error("invalid filter pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
