//! The immutable table aggregate and its construction pipeline.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tabular_model::{
    CellValue, ClassifiedValue, ColumnType, NormalizeOptions, RawValue, Result, TableError,
    ValueKind,
};

use crate::classify::classify;
use crate::header::{column_letter, resolve_header};
use crate::normalize::{normalize_cells, reshape_row};
use crate::resolve::{enforce_hint, resolve_column};

/// An immutable, normalized table: name, header, one resolved type per
/// column, and rows of typed cells.
///
/// Every row holds exactly `column_count()` cells. Construction either
/// fully succeeds or fails; a partially normalized table is never
/// observable. Transformations (`filter_columns`, `filter_rows`) return
/// new tables; row-preserving ones share row storage with the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    name: String,
    header: Vec<String>,
    column_types: Vec<ColumnType>,
    rows: Vec<Arc<[CellValue]>>,
}

impl TableData {
    pub(crate) fn from_parts(
        name: String,
        header: Vec<String>,
        column_types: Vec<ColumnType>,
        rows: Vec<Arc<[CellValue]>>,
    ) -> Self {
        debug_assert!(header.is_empty() || header.len() == column_types.len());
        debug_assert!(rows.iter().all(|row| row.len() == column_types.len()));
        Self {
            name,
            header,
            column_types,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names, empty for positional-only tables.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn column_type(&self, index: usize) -> Option<ColumnType> {
        self.column_types.get(index).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_types.len()
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// The display name of a column: its header entry, or the
    /// spreadsheet-style letter for unnamed columns.
    pub fn column_name(&self, index: usize) -> String {
        self.header
            .get(index)
            .cloned()
            .unwrap_or_else(|| column_letter(index))
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(AsRef::as_ref)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(AsRef::as_ref)
    }

    pub(crate) fn shared_rows(&self) -> &[Arc<[CellValue]>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    pub fn is_empty_header(&self) -> bool {
        self.header.is_empty()
    }

    pub fn is_empty_rows(&self) -> bool {
        self.rows.is_empty()
    }

    /// A table is empty when it has no header or no rows.
    pub fn is_empty(&self) -> bool {
        self.is_empty_header() || self.is_empty_rows()
    }

    /// Compare by name, header, and the canonical text rendering of
    /// every cell, ignoring column types. A table built from `[1, 2]`
    /// and one built from `["1", "2"]` compare equal here but not under
    /// `==`.
    pub fn equals_loose(&self, other: &TableData) -> bool {
        if self.name != other.name
            || self.header != other.header
            || self.rows.len() != other.rows.len()
        {
            return false;
        }
        self.rows().zip(other.rows()).all(|(lhs, rhs)| {
            lhs.len() == rhs.len()
                && lhs
                    .iter()
                    .zip(rhs)
                    .all(|(a, b)| a.to_string() == b.to_string())
        })
    }
}

impl fmt::Display for TableData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table_name={}, header=[{}], rows={}",
            self.name,
            self.header.join(", "),
            self.rows.len()
        )
    }
}

/// Normalization session: holds the configuration once and builds any
/// number of tables with it.
///
/// All state is read-only after construction, so a `Normalizer` can be
/// shared across threads by reference.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Build a normalized table from a header and raw rows.
    ///
    /// Pipeline: validate the table name and header (duplicates are
    /// detected case-insensitively), enforce the row shape policy,
    /// classify every cell grouped by column, resolve one type per
    /// column, coerce every row to the resolved types, assemble.
    ///
    /// Fails fast: the first structural problem aborts the whole build,
    /// in scanning order header, then row shape, then normalization.
    /// Pass an empty `header` for positional-only tables; their width is
    /// taken from the first row.
    pub fn build(
        &self,
        name: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<RawValue>>,
    ) -> Result<TableData> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TableError::InvalidTableName {
                name: name.to_string(),
            });
        }

        let header = resolve_header(&header, self.options.rename_empty_headers)?;
        let mut seen = BTreeSet::new();
        for column in &header {
            if !seen.insert(column.to_ascii_lowercase()) {
                return Err(TableError::DuplicateHeader {
                    name: column.clone(),
                });
            }
        }

        let width = if header.is_empty() {
            rows.first().map_or(0, Vec::len)
        } else {
            header.len()
        };

        let mut classified: Vec<Vec<ClassifiedValue>> = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.into_iter().enumerate() {
            let row = reshape_row(row_idx, row, width, self.options.row_shape)?;
            let cells = row
                .iter()
                .enumerate()
                .map(|(col_idx, raw)| {
                    let hint = self
                        .options
                        .type_hints
                        .for_column(col_idx, header.get(col_idx).map(String::as_str));
                    classify(raw, hint, &self.options)
                })
                .collect();
            classified.push(cells);
        }

        let mut column_types = Vec::with_capacity(width);
        for col_idx in 0..width {
            let column_cells = classified.iter().map(|row| &row[col_idx]);
            let hint = self
                .options
                .type_hints
                .for_column(col_idx, header.get(col_idx).map(String::as_str));
            let resolved = match hint.filter(|hint| *hint != ColumnType::NullOnly) {
                Some(hint) => {
                    let label = header
                        .get(col_idx)
                        .cloned()
                        .unwrap_or_else(|| column_letter(col_idx));
                    enforce_hint(&label, hint, column_cells, self.options.hint_conflict)?
                }
                None => resolve_column(column_cells),
            };
            column_types.push(resolved);
        }

        let normalized: Vec<Arc<[CellValue]>> = classified
            .iter()
            .map(|cells| Arc::from(normalize_cells(cells, &column_types)))
            .collect();

        tracing::debug!(
            table = name,
            rows = normalized.len(),
            columns = width,
            "normalized table"
        );

        Ok(TableData::from_parts(
            name.to_string(),
            header,
            column_types,
            normalized,
        ))
    }

    /// Normalize a single raw row against already-resolved column types,
    /// the row-level contract used when appending pre-typed data to an
    /// existing shape.
    ///
    /// The shape policy applies as in `build`. A value the declared type
    /// cannot coerce is an `UnresolvableTypeHint` error; widening into
    /// text columns always succeeds.
    pub fn normalize_row(
        &self,
        raw: &[RawValue],
        types: &[ColumnType],
    ) -> Result<Vec<CellValue>> {
        let row = reshape_row(0, raw.to_vec(), types.len(), self.options.row_shape)?;
        let mut cells = Vec::with_capacity(types.len());
        for (col_idx, (value, ty)) in row.iter().zip(types).enumerate() {
            let cell = classify(value, Some(*ty), &self.options);
            if cell.kind != ValueKind::Null && cell.kind != ty.kind() && *ty != ColumnType::NullOnly
            {
                return Err(TableError::UnresolvableTypeHint {
                    column: column_letter(col_idx),
                    hint: *ty,
                    value: cell.value.to_string(),
                });
            }
            cells.push(crate::normalize::coerce_cell(&cell, *ty));
        }
        Ok(cells)
    }
}
