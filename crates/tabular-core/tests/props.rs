//! Property tests for the widening and projection guarantees.

use proptest::prelude::*;
use tabular_core::{Normalizer, TableData};
use tabular_model::{CellValue, ColumnType, RawValue};

fn single_column(values: Vec<RawValue>) -> TableData {
    Normalizer::default()
        .build(
            "prop",
            vec!["v".to_string()],
            values.into_iter().map(|value| vec![value]).collect(),
        )
        .unwrap()
}

proptest! {
    #[test]
    fn integer_columns_resolve_to_integer(
        values in prop::collection::vec(any::<i64>(), 1..20),
    ) {
        let table = single_column(values.iter().copied().map(RawValue::Int).collect());
        prop_assert_eq!(table.column_types(), &[ColumnType::Integer]);
    }

    // Widening: a single textual outlier forces the whole column to
    // text. The outlier alphabet is chosen so it can never parse as a
    // number, boolean token, null token, or datetime.
    #[test]
    fn one_text_outlier_widens_an_integer_column(
        values in prop::collection::vec(any::<i64>(), 1..20),
        outlier in "[g-k]{1,6}",
        position in any::<prop::sample::Index>(),
    ) {
        let mut column: Vec<RawValue> = values.iter().copied().map(RawValue::Int).collect();
        let at = position.index(column.len() + 1);
        column.insert(at, RawValue::Text(outlier));
        let table = single_column(column);
        prop_assert_eq!(table.column_types(), &[ColumnType::Text]);
    }

    #[test]
    fn typed_integers_round_trip_through_column_values(
        values in prop::collection::vec(any::<i64>(), 0..20),
    ) {
        let table = single_column(values.iter().copied().map(RawValue::Int).collect());
        let expected: Vec<CellValue> = values.iter().copied().map(CellValue::Int).collect();
        prop_assert_eq!(table.column_values_at(0).unwrap(), expected);
    }

    #[test]
    fn mapping_rows_are_idempotent(
        values in prop::collection::vec(any::<i64>(), 0..10),
    ) {
        let table = single_column(values.iter().copied().map(RawValue::Int).collect());
        prop_assert_eq!(
            table.as_mapping_rows().unwrap(),
            table.as_mapping_rows().unwrap()
        );
    }

    #[test]
    fn column_filters_compose(
        rows in prop::collection::vec(prop::collection::vec(any::<i64>(), 3..=3), 0..10),
    ) {
        let table = Normalizer::default()
            .build(
                "prop",
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                rows.iter()
                    .map(|row| row.iter().copied().map(RawValue::Int).collect())
                    .collect(),
            )
            .unwrap();
        let narrowed = table
            .filter_columns(|_, name| name == "a" || name == "c")
            .filter_columns(|_, name| name == "c");
        let direct = table.filter_columns(|_, name| name == "c");
        prop_assert_eq!(narrowed, direct);
    }
}
