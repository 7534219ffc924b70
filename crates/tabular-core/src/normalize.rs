//! Row normalization: applying resolved column types to classified
//! cells and enforcing the row shape policy.

use tabular_model::{
    CellValue, ClassifiedValue, ColumnType, RawValue, Result, RowShapePolicy, TableError,
};

/// Bring a raw row to the expected width.
///
/// Under `Strict` a length mismatch is a `RaggedRow` error; under
/// `PadOrTruncate` short rows gain trailing nulls and long rows lose
/// their tail.
pub(crate) fn reshape_row(
    row_idx: usize,
    mut row: Vec<RawValue>,
    width: usize,
    policy: RowShapePolicy,
) -> Result<Vec<RawValue>> {
    if row.len() == width {
        return Ok(row);
    }
    match policy {
        RowShapePolicy::Strict => Err(TableError::RaggedRow {
            row: row_idx,
            expected: width,
            actual: row.len(),
        }),
        RowShapePolicy::PadOrTruncate => {
            row.resize(width, RawValue::Null);
            Ok(row)
        }
    }
}

/// Coerce one classified cell to its column's final type.
///
/// Null classifications become the null sentinel regardless of column
/// type. Integers widen into real columns; anything widens into a text
/// column via its canonical rendering, except original text which keeps
/// its string form. All other coercions are identities because the
/// resolver never narrows.
pub(crate) fn coerce_cell(cell: &ClassifiedValue, ty: ColumnType) -> CellValue {
    if cell.is_null() {
        return CellValue::Null;
    }
    match ty {
        ColumnType::NullOnly => CellValue::Null,
        ColumnType::Text => match &cell.value {
            CellValue::Text(text) => CellValue::Text(text.clone()),
            other => CellValue::Text(other.to_string()),
        },
        ColumnType::Real => match cell.value {
            CellValue::Int(value) => CellValue::Real(value as f64),
            ref other => other.clone(),
        },
        _ => cell.value.clone(),
    }
}

/// Normalize one classified row against the resolved column types.
pub(crate) fn normalize_cells(cells: &[ClassifiedValue], types: &[ColumnType]) -> Vec<CellValue> {
    cells
        .iter()
        .zip(types)
        .map(|(cell, ty)| coerce_cell(cell, *ty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_ragged_rows() {
        let row = vec![RawValue::Int(1), RawValue::Int(2), RawValue::Int(3)];
        let err = reshape_row(1, row, 2, RowShapePolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            TableError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 3,
            }
        ));
    }

    #[test]
    fn pad_or_truncate_reshapes() {
        let short = vec![RawValue::Int(1)];
        let padded = reshape_row(0, short, 3, RowShapePolicy::PadOrTruncate).unwrap();
        assert_eq!(
            padded,
            vec![RawValue::Int(1), RawValue::Null, RawValue::Null]
        );

        let long = vec![RawValue::Int(1), RawValue::Int(2), RawValue::Int(3)];
        let truncated = reshape_row(0, long, 2, RowShapePolicy::PadOrTruncate).unwrap();
        assert_eq!(truncated, vec![RawValue::Int(1), RawValue::Int(2)]);
    }

    #[test]
    fn coercion_widens_without_loss() {
        let int_cell = ClassifiedValue::new(CellValue::Int(7).kind(), CellValue::Int(7));
        assert_eq!(coerce_cell(&int_cell, ColumnType::Real), CellValue::Real(7.0));
        assert_eq!(
            coerce_cell(&int_cell, ColumnType::Text),
            CellValue::Text("7".to_string())
        );
        assert_eq!(coerce_cell(&int_cell, ColumnType::Integer), CellValue::Int(7));

        let null = ClassifiedValue::null();
        assert_eq!(coerce_cell(&null, ColumnType::Integer), CellValue::Null);
    }
}
