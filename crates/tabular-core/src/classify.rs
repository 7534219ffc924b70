//! Value classification: deciding the semantic kind of a single cell.
//!
//! The classifier runs a fixed, ordered battery of checks and never
//! fails; unparseable input falls back to text so malformed data cannot
//! halt normalization.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tabular_model::{CellValue, ClassifiedValue, ColumnType, NormalizeOptions, RawValue};

/// Classify one raw cell value.
///
/// Order of checks: null-like (the null sentinel or a configured null
/// token), hinted coercion, boolean tokens, integer, real, datetime,
/// text fallback. Null-like cells classify as null under any hint, so
/// null tokens are never captured by a text or datetime hint. The first
/// successful check wins.
pub fn classify(
    raw: &RawValue,
    hint: Option<ColumnType>,
    options: &NormalizeOptions,
) -> ClassifiedValue {
    match raw {
        RawValue::Null => return ClassifiedValue::null(),
        RawValue::Text(text) if options.is_null_token(text.trim()) => {
            return ClassifiedValue::null();
        }
        _ => {}
    }

    if let Some(hint) = hint.filter(|hint| *hint != ColumnType::NullOnly)
        && let Some(value) = coerce_with_hint(raw, hint, options)
    {
        return ClassifiedValue::new(value.kind(), value);
    }

    match raw {
        // Null-like inputs returned above.
        RawValue::Null => ClassifiedValue::null(),
        RawValue::Bool(value) => classified(CellValue::Bool(*value)),
        RawValue::Int(value) => classified(CellValue::Int(*value)),
        RawValue::Real(value) => classified(CellValue::Real(*value)),
        RawValue::Text(text) => classify_text(text, options),
    }
}

fn classified(value: CellValue) -> ClassifiedValue {
    ClassifiedValue::new(value.kind(), value)
}

/// Inference battery for textual cells.
fn classify_text(text: &str, options: &NormalizeOptions) -> ClassifiedValue {
    let trimmed = text.trim();
    if let Some(flag) = options.boolean_tokens.classify(trimmed, false) {
        return classified(CellValue::Bool(flag));
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return classified(CellValue::Int(value));
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return classified(CellValue::Real(value));
    }
    if let Some(value) = parse_datetime(trimmed) {
        return classified(CellValue::DateTime(value));
    }
    // Fallback keeps the original string form, untrimmed.
    classified(CellValue::Text(text.to_string()))
}

/// Attempt direct coercion to the hinted type. `None` falls through to
/// inference.
fn coerce_with_hint(
    raw: &RawValue,
    hint: ColumnType,
    options: &NormalizeOptions,
) -> Option<CellValue> {
    match hint {
        ColumnType::Integer => match raw {
            RawValue::Int(value) => Some(CellValue::Int(*value)),
            RawValue::Real(value) => real_to_int(*value).map(CellValue::Int),
            RawValue::Text(text) => text.trim().parse::<i64>().ok().map(CellValue::Int),
            _ => None,
        },
        ColumnType::Real => match raw {
            RawValue::Int(value) => Some(CellValue::Real(*value as f64)),
            RawValue::Real(value) => Some(CellValue::Real(*value)),
            RawValue::Text(text) => text.trim().parse::<f64>().ok().map(CellValue::Real),
            _ => None,
        },
        ColumnType::Boolean => match raw {
            RawValue::Bool(value) => Some(CellValue::Bool(*value)),
            RawValue::Int(0) => Some(CellValue::Bool(false)),
            RawValue::Int(1) => Some(CellValue::Bool(true)),
            RawValue::Text(text) => options
                .boolean_tokens
                .classify(text.trim(), true)
                .map(CellValue::Bool),
            _ => None,
        },
        ColumnType::DateTime => match raw {
            RawValue::Text(text) => parse_datetime(text.trim()).map(CellValue::DateTime),
            _ => None,
        },
        ColumnType::Text => Some(match raw {
            RawValue::Text(text) => CellValue::Text(text.clone()),
            RawValue::Bool(value) => CellValue::Text(CellValue::Bool(*value).to_string()),
            RawValue::Int(value) => CellValue::Text(CellValue::Int(*value).to_string()),
            RawValue::Real(value) => CellValue::Text(CellValue::Real(*value).to_string()),
            RawValue::Null => CellValue::Null,
        }),
        ColumnType::NullOnly => None,
    }
}

fn real_to_int(value: f64) -> Option<i64> {
    if value.is_finite()
        && value.fract() == 0.0
        && (i64::MIN as f64..=i64::MAX as f64).contains(&value)
    {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse an ISO 8601 extended datetime: full RFC 3339, date + time with
/// a `T` or space separator (optionally with a UTC offset), or a bare
/// date. Naive values are taken as UTC.
fn parse_datetime(trimmed: &str) -> Option<DateTime<FixedOffset>> {
    if !has_four_digit_year(trimmed) {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value);
    }
    if let Ok(value) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(value);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().fixed_offset());
    }
    None
}

// Guards against chrono reading strings like "3-4-5" as year 3.
fn has_four_digit_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}
