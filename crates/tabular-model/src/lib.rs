//! Data model for normalized tabular data.
//!
//! This crate defines the value variants, column types, configuration,
//! and error taxonomy shared by the normalization engine. It holds no
//! logic beyond the types themselves; the pipeline lives in
//! `tabular-core`.

pub mod error;
pub mod options;
pub mod value;

pub use error::{Result, TableError};
pub use options::{
    BooleanTokens, HintConflictPolicy, NormalizeOptions, RowShapePolicy, TypeHints,
};
pub use value::{CellValue, ClassifiedValue, ColumnType, RawValue, ValueKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_serializes_tagged() {
        let json = serde_json::to_string(&CellValue::Int(7)).expect("serialize cell");
        assert_eq!(json, r#"{"kind":"Int","value":7}"#);
        let round: CellValue = serde_json::from_str(&json).expect("deserialize cell");
        assert_eq!(round, CellValue::Int(7));
    }

    #[test]
    fn options_round_trip() {
        let options = NormalizeOptions::new()
            .with_null_token("N/A")
            .with_hint("age", ColumnType::Integer)
            .with_row_shape(RowShapePolicy::PadOrTruncate);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: NormalizeOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }
}
