//! Type inference and normalization engine for tabular data.
//!
//! Raw rows of heterogeneous values go in; an immutable [`TableData`]
//! with one resolved type per column comes out. The pipeline classifies
//! every cell, reduces the classifications to an effective column type
//! by widening precedence, coerces each row to the resolved types, and
//! exposes the result through pure projections (mapping rows, column
//! and row filters, column-major access).
//!
//! ```
//! use tabular_core::Normalizer;
//! use tabular_model::ColumnType;
//!
//! let normalizer = Normalizer::default();
//! let table = normalizer
//!     .build(
//!         "people",
//!         vec!["id".into(), "name".into(), "age".into()],
//!         vec![
//!             vec![1i64.into(), "Alice".into(), 30i64.into()],
//!             vec![2i64.into(), "Bob".into(), "".into()],
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(
//!     table.column_types(),
//!     &[ColumnType::Integer, ColumnType::Text, ColumnType::Integer]
//! );
//! ```

pub mod classify;
pub mod export;
pub mod header;
mod normalize;
pub mod resolve;
pub mod table;

pub use classify::classify;
pub use export::{FilterOptions, MappingRow, PatternMatch};
pub use header::column_letter;
pub use resolve::resolve_column;
pub use table::{Normalizer, TableData};

// Re-exported so downstream formatters and writers only need one crate.
pub use tabular_model::{
    BooleanTokens, CellValue, ClassifiedValue, ColumnType, HintConflictPolicy, NormalizeOptions,
    RawValue, Result, RowShapePolicy, TableError, TypeHints, ValueKind,
};
