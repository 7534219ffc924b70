//! Configuration options for table normalization.
//!
//! Null tokens, boolean tokens, and shape/hint policies are passed
//! explicitly through the pipeline instead of living in ambient state.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::ColumnType;

/// Policy for rows whose length differs from the header length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowShapePolicy {
    /// Reject ragged rows. Silent reshaping hides upstream data-quality
    /// problems, so this is the default.
    #[default]
    Strict,
    /// Pad short rows with nulls and truncate long rows.
    PadOrTruncate,
}

/// Policy when a declared type hint cannot coerce an observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HintConflictPolicy {
    /// Fail construction with `UnresolvableTypeHint`.
    #[default]
    Fail,
    /// Widen the column to text and keep going.
    FallbackToText,
}

/// Token sets recognized as boolean values, matched case-insensitively
/// against the trimmed cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanTokens {
    truthy: BTreeSet<String>,
    falsy: BTreeSet<String>,
}

impl Default for BooleanTokens {
    fn default() -> Self {
        Self {
            truthy: ["true", "yes"].map(String::from).into(),
            falsy: ["false", "no"].map(String::from).into(),
        }
    }
}

impl BooleanTokens {
    pub fn new(
        truthy: impl IntoIterator<Item = impl Into<String>>,
        falsy: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            truthy: truthy
                .into_iter()
                .map(|token| token.into().to_ascii_lowercase())
                .collect(),
            falsy: falsy
                .into_iter()
                .map(|token| token.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Match the trimmed cell text against the configured tokens.
    ///
    /// `numeric_pair` additionally accepts `"1"`/`"0"`; it is only set
    /// when a boolean hint is active for the column, so numeric 1/0 data
    /// is never misread as boolean.
    pub fn classify(&self, trimmed: &str, numeric_pair: bool) -> Option<bool> {
        let lowered = trimmed.to_ascii_lowercase();
        if self.truthy.contains(&lowered) {
            return Some(true);
        }
        if self.falsy.contains(&lowered) {
            return Some(false);
        }
        if numeric_pair {
            match lowered.as_str() {
                "1" => return Some(true),
                "0" => return Some(false),
                _ => {}
            }
        }
        None
    }
}

/// Declared per-column types, keyed by header name (case-insensitive)
/// or by position. A hint bypasses type inference for its column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHints {
    by_name: HashMap<String, ColumnType>,
    by_index: HashMap<usize, ColumnType>,
}

impl TypeHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_index.is_empty()
    }

    pub fn insert_name(&mut self, name: impl Into<String>, ty: ColumnType) {
        self.by_name.insert(name.into().to_ascii_lowercase(), ty);
    }

    pub fn insert_index(&mut self, index: usize, ty: ColumnType) {
        self.by_index.insert(index, ty);
    }

    /// Look up the hint for a column. Positional hints win over named
    /// ones when both are present.
    pub fn for_column(&self, index: usize, name: Option<&str>) -> Option<ColumnType> {
        if let Some(ty) = self.by_index.get(&index) {
            return Some(*ty);
        }
        name.and_then(|name| self.by_name.get(&name.to_ascii_lowercase()))
            .copied()
    }
}

/// Options controlling classification and normalization behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Ragged-row handling.
    pub row_shape: RowShapePolicy,

    /// Cell texts treated as null, matched exactly against the trimmed
    /// cell.
    pub null_tokens: BTreeSet<String>,

    /// Boolean token sets.
    pub boolean_tokens: BooleanTokens,

    /// Declared per-column types.
    pub type_hints: TypeHints,

    /// Behavior when a hint cannot coerce an observed value.
    pub hint_conflict: HintConflictPolicy,

    /// Rename headers that are empty after preprocessing to their
    /// spreadsheet-style positional letter instead of failing.
    pub rename_empty_headers: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            row_shape: RowShapePolicy::default(),
            null_tokens: ["", "NULL"].map(String::from).into(),
            boolean_tokens: BooleanTokens::default(),
            type_hints: TypeHints::default(),
            hint_conflict: HintConflictPolicy::default(),
            rename_empty_headers: false,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Permissive preset: pad/truncate ragged rows, widen hint conflicts
    /// to text, rename empty headers.
    pub fn lenient() -> Self {
        Self {
            row_shape: RowShapePolicy::PadOrTruncate,
            hint_conflict: HintConflictPolicy::FallbackToText,
            rename_empty_headers: true,
            ..Self::default()
        }
    }

    pub fn with_row_shape(mut self, policy: RowShapePolicy) -> Self {
        self.row_shape = policy;
        self
    }

    pub fn with_null_tokens(
        mut self,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.null_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_tokens.insert(token.into());
        self
    }

    pub fn with_boolean_tokens(mut self, tokens: BooleanTokens) -> Self {
        self.boolean_tokens = tokens;
        self
    }

    pub fn with_hint(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.type_hints.insert_name(name, ty);
        self
    }

    pub fn with_hint_at(mut self, index: usize, ty: ColumnType) -> Self {
        self.type_hints.insert_index(index, ty);
        self
    }

    pub fn with_hint_conflict(mut self, policy: HintConflictPolicy) -> Self {
        self.hint_conflict = policy;
        self
    }

    pub fn with_rename_empty_headers(mut self, rename: bool) -> Self {
        self.rename_empty_headers = rename;
        self
    }

    /// Whether the trimmed cell text is a configured null token.
    pub fn is_null_token(&self, trimmed: &str) -> bool {
        self.null_tokens.contains(trimmed)
    }
}
