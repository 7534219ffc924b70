//! Integration tests for the tabular data model types.

use tabular_model::{
    BooleanTokens, CellValue, ColumnType, HintConflictPolicy, NormalizeOptions, RawValue,
    RowShapePolicy, TableError, ValueKind,
};

#[test]
fn raw_value_conversions() {
    assert_eq!(RawValue::from(3i64), RawValue::Int(3));
    assert_eq!(RawValue::from(3i32), RawValue::Int(3));
    assert_eq!(RawValue::from(2.5f64), RawValue::Real(2.5));
    assert_eq!(RawValue::from(true), RawValue::Bool(true));
    assert_eq!(RawValue::from("abc"), RawValue::Text("abc".to_string()));
    assert_eq!(RawValue::from(None::<&str>), RawValue::Null);
}

#[test]
fn cell_value_kind() {
    assert_eq!(CellValue::Null.kind(), ValueKind::Null);
    assert_eq!(CellValue::Int(1).kind(), ValueKind::Int);
    assert_eq!(CellValue::Real(1.5).kind(), ValueKind::Real);
    assert_eq!(CellValue::Text(String::new()).kind(), ValueKind::Text);
}

#[test]
fn column_type_display_round_trip() {
    for ty in [
        ColumnType::Integer,
        ColumnType::Real,
        ColumnType::Boolean,
        ColumnType::DateTime,
        ColumnType::Text,
        ColumnType::NullOnly,
    ] {
        let parsed: ColumnType = ty.as_str().parse().expect("parse canonical name");
        assert_eq!(parsed, ty);
    }
}

#[test]
fn lenient_preset() {
    let options = NormalizeOptions::lenient();
    assert_eq!(options.row_shape, RowShapePolicy::PadOrTruncate);
    assert_eq!(options.hint_conflict, HintConflictPolicy::FallbackToText);
    assert!(options.rename_empty_headers);
    // Token defaults are unchanged by the preset.
    assert!(options.is_null_token("NULL"));
}

#[test]
fn custom_boolean_tokens() {
    let options = NormalizeOptions::new()
        .with_boolean_tokens(BooleanTokens::new(["y", "on"], ["n", "off"]));
    assert_eq!(options.boolean_tokens.classify("Y", false), Some(true));
    assert_eq!(options.boolean_tokens.classify("off", false), Some(false));
    assert_eq!(options.boolean_tokens.classify("true", false), None);
}

#[test]
fn error_messages_name_the_problem() {
    let err = TableError::RaggedRow {
        row: 1,
        expected: 2,
        actual: 3,
    };
    assert_eq!(err.to_string(), "row 1 has 3 cells, expected 2");

    let err = TableError::UnresolvableTypeHint {
        column: "age".to_string(),
        hint: ColumnType::Integer,
        value: "abc".to_string(),
    };
    assert!(err.to_string().contains("age"));
    assert!(err.to_string().contains("integer"));
}
