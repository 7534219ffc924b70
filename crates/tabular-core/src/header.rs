//! Header name preprocessing and fallback naming.

use tabular_model::{Result, TableError};

/// Clean up a proposed header name: strip a UTF-8 BOM and surrounding
/// whitespace, drop one layer of surrounding double quotes, and collapse
/// internal whitespace runs to single spaces.
pub fn preprocess_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    let trimmed = strip_quotes(trimmed);
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Spreadsheet-style column label: `A`..`Z`, then `AA`, `AB`, ...
///
/// Used to label unnamed columns in diagnostics and as the replacement
/// name when empty headers are renamed instead of rejected.
pub fn column_letter(index: usize) -> String {
    if index < 26 {
        return char::from(b'A' + index as u8).to_string();
    }
    let (div, rem) = (index / 26, index % 26);
    let mut label = column_letter(div - 1);
    label.push(char::from(b'A' + rem as u8));
    label
}

/// Preprocess and validate a full header.
///
/// Names that come out empty are rejected with `InvalidHeaderName`, or
/// renamed to their positional letter when `rename_empty` is set.
pub fn resolve_header(raw: &[String], rename_empty: bool) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(raw.len());
    for (index, name) in raw.iter().enumerate() {
        let cleaned = preprocess_header(name);
        if cleaned.is_empty() {
            if rename_empty {
                names.push(column_letter(index));
                continue;
            }
            return Err(TableError::InvalidHeaderName {
                index,
                name: name.clone(),
            });
        }
        names.push(cleaned);
    }
    Ok(names)
}
