//! Column type resolution: reducing per-cell classifications to one
//! effective type per column.

use tabular_model::{ClassifiedValue, ColumnType, HintConflictPolicy, Result, TableError, ValueKind};

/// Reduce a column's classifications by the widening precedence order.
///
/// All-null columns resolve to `NullOnly`; nulls are otherwise ignored.
/// Any text forces text. Datetimes and booleans only survive when the
/// whole column agrees; mixed with anything else they widen to text.
/// Reals absorb integers. The result is always the most permissive type
/// that represents every observed value without loss.
pub fn resolve_column<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a ClassifiedValue>,
{
    let mut non_null = 0usize;
    let mut text = 0usize;
    let mut datetime = 0usize;
    let mut boolean = 0usize;
    let mut real = 0usize;

    for cell in cells {
        match cell.kind {
            ValueKind::Null => continue,
            ValueKind::Text => text += 1,
            ValueKind::DateTime => datetime += 1,
            ValueKind::Bool => boolean += 1,
            ValueKind::Real => real += 1,
            ValueKind::Int => {}
        }
        non_null += 1;
    }

    if non_null == 0 {
        ColumnType::NullOnly
    } else if text > 0 {
        ColumnType::Text
    } else if datetime > 0 {
        if datetime == non_null {
            ColumnType::DateTime
        } else {
            ColumnType::Text
        }
    } else if boolean > 0 {
        if boolean == non_null {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    } else if real > 0 {
        ColumnType::Real
    } else {
        ColumnType::Integer
    }
}

/// Apply a declared hint to a column: the hint bypasses reduction, but
/// every non-null cell must have coerced to it during classification.
///
/// A conflicting cell either fails construction or, under
/// `FallbackToText`, widens the whole column to text with a warning.
pub fn enforce_hint<'a, I>(
    column: &str,
    hint: ColumnType,
    cells: I,
    policy: HintConflictPolicy,
) -> Result<ColumnType>
where
    I: IntoIterator<Item = &'a ClassifiedValue>,
{
    let conflict = cells
        .into_iter()
        .find(|cell| cell.kind != ValueKind::Null && cell.kind != hint.kind());

    match conflict {
        None => Ok(hint),
        Some(cell) => match policy {
            HintConflictPolicy::Fail => Err(TableError::UnresolvableTypeHint {
                column: column.to_string(),
                hint,
                value: cell.value.to_string(),
            }),
            HintConflictPolicy::FallbackToText => {
                tracing::warn!(
                    column,
                    hint = %hint,
                    value = %cell.value,
                    "type hint conflict, widening column to text"
                );
                Ok(ColumnType::Text)
            }
        },
    }
}
