//! Pure projections of an already-normalized table.
//!
//! Nothing here re-runs classification or resolution; repeated exports
//! are idempotent and cheap.

use std::sync::Arc;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tabular_model::{CellValue, Result, TableError};

use crate::table::TableData;

/// How multiple column filter patterns combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternMatch {
    /// Keep columns matching any pattern.
    #[default]
    Any,
    /// Keep columns matching every pattern.
    All,
}

/// Options for pattern-based column filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub match_mode: PatternMatch,
    /// Keep the columns that do NOT match.
    pub invert: bool,
    /// Treat patterns as regular expressions instead of literal names.
    pub regex: bool,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_all(mut self) -> Self {
        self.match_mode = PatternMatch::All;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    pub fn with_regex(mut self) -> Self {
        self.regex = true;
        self
    }
}

/// One exported row as an ordered name-to-value mapping; iteration and
/// serialization follow header order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    entries: Vec<(String, CellValue)>,
}

impl MappingRow {
    fn new(entries: Vec<(String, CellValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MappingRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl TableData {
    /// Export one ordered name-to-value mapping per row, insertion order
    /// equal to header order. Null cells are included as explicit nulls.
    ///
    /// Fails with `NoHeader` for positional-only tables.
    pub fn as_mapping_rows(&self) -> Result<Vec<MappingRow>> {
        if !self.has_header() {
            return Err(TableError::NoHeader);
        }
        Ok(self
            .rows()
            .map(|row| {
                MappingRow::new(
                    self.header()
                        .iter()
                        .zip(row)
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect(),
                )
            })
            .collect())
    }

    /// A new table restricted to the columns the predicate selects,
    /// preserving the original column order among the survivors. The
    /// predicate receives each column's index and name (empty for
    /// unnamed columns).
    pub fn filter_columns<F>(&self, mut predicate: F) -> TableData
    where
        F: FnMut(usize, &str) -> bool,
    {
        let selected: Vec<usize> = (0..self.column_count())
            .filter(|&idx| {
                let name = self.header().get(idx).map_or("", String::as_str);
                predicate(idx, name)
            })
            .collect();

        tracing::debug!(
            table = self.name(),
            selected = selected.len(),
            "filter_columns"
        );

        let header = if self.has_header() {
            selected
                .iter()
                .map(|&idx| self.header()[idx].clone())
                .collect()
        } else {
            Vec::new()
        };
        let column_types = selected
            .iter()
            .map(|&idx| self.column_types()[idx])
            .collect();
        let rows = self
            .rows()
            .map(|row| {
                Arc::from(
                    selected
                        .iter()
                        .map(|&idx| row[idx].clone())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        TableData::from_parts(self.name().to_string(), header, column_types, rows)
    }

    /// Pattern-based column filtering over header names: literal
    /// comparison by default, regex search with `FilterOptions::regex`;
    /// patterns combine per `match_mode` and `invert` flips the
    /// selection. An empty pattern list returns the table unchanged.
    pub fn filter_columns_matching(
        &self,
        patterns: &[&str],
        options: FilterOptions,
    ) -> Result<TableData> {
        if patterns.is_empty() {
            return Ok(self.clone());
        }

        let regexes = if options.regex {
            Some(
                patterns
                    .iter()
                    .map(|pattern| {
                        Regex::new(pattern).map_err(|source| TableError::InvalidPattern {
                            pattern: (*pattern).to_string(),
                            source: Box::new(source),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?,
            )
        } else {
            None
        };

        Ok(self.filter_columns(|_, name| {
            let mut matches = (0..patterns.len()).map(|idx| {
                let is_match = match &regexes {
                    Some(regexes) => regexes[idx].is_match(name),
                    None => name == patterns[idx],
                };
                is_match != options.invert
            });
            match options.match_mode {
                PatternMatch::Any => matches.any(|m| m),
                PatternMatch::All => matches.all(|m| m),
            }
        }))
    }

    /// A new table with the same header and column types holding only
    /// the rows the predicate keeps. Row storage is shared with the
    /// source, not copied.
    pub fn filter_rows<F>(&self, mut predicate: F) -> TableData
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let rows: Vec<_> = self
            .shared_rows()
            .iter()
            .filter(|row| predicate(row.as_ref()))
            .map(Arc::clone)
            .collect();

        tracing::debug!(
            table = self.name(),
            kept = rows.len(),
            total = self.row_count(),
            "filter_rows"
        );

        TableData::from_parts(
            self.name().to_string(),
            self.header().to_vec(),
            self.column_types().to_vec(),
            rows,
        )
    }

    /// All values of one column in row order, looked up by name
    /// (case-insensitive).
    pub fn column_values(&self, name: &str) -> Option<Vec<CellValue>> {
        self.column_index(name)
            .and_then(|idx| self.column_values_at(idx))
    }

    /// All values of one column in row order, by position.
    pub fn column_values_at(&self, index: usize) -> Option<Vec<CellValue>> {
        if index >= self.column_count() {
            return None;
        }
        Some(self.rows().map(|row| row[index].clone()).collect())
    }

    /// Column-major view of the whole table.
    pub fn columns(&self) -> Vec<Vec<CellValue>> {
        (0..self.column_count())
            .map(|idx| self.rows().map(|row| row[idx].clone()).collect())
            .collect()
    }
}
