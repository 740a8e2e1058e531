//! Conversion between typed field values and spreadsheet cell text.
//!
//! Encoding is lossless for every supported type: unset values become the
//! [`NIL`] sentinel rather than the empty string, and dates are written in
//! their ISO-8601 text form. Decoding coerces by the column's declared
//! [`ColumnType`], not by inspecting whatever value the field held before.

use crate::value::{unset_date, ColumnType, FieldValue, NIL};
use chrono::{DateTime, Utc};

/// Encode a field value as cell text.
#[must_use]
pub fn encode(value: &FieldValue) -> String {
    match value {
        v if v.is_unset() => NIL.to_string(),
        FieldValue::Date(date) => date.to_rfc3339(),
        other => other.to_string(),
    }
}

/// Decode cell text into a field value using the column's coercion rule.
///
/// Empty text and the [`NIL`] sentinel both decode to [`FieldValue::Null`].
#[must_use]
pub fn decode(column: ColumnType, raw: &str) -> FieldValue {
    if raw.is_empty() || raw == NIL {
        return FieldValue::Null;
    }

    match column {
        ColumnType::String => FieldValue::String(raw.to_string()),
        ColumnType::Integer => {
            if is_integer_text(raw) {
                if let Ok(n) = raw.parse::<i64>() {
                    return FieldValue::Int(n);
                }
            }
            raw.parse::<f64>().map_or(FieldValue::Null, FieldValue::Float)
        }
        ColumnType::Float => raw.parse::<f64>().map_or(FieldValue::Null, FieldValue::Float),
        ColumnType::Boolean => FieldValue::Bool(parse_bool(raw)),
        ColumnType::Date => DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| FieldValue::Date(unset_date()),
            |date| FieldValue::Date(date.with_timezone(&Utc)),
        ),
    }
}

/// Strict optional-sign-plus-digits check.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Permissive boolean parser; anything ambiguous reads as false.
fn parse_bool(text: &str) -> bool {
    matches!(text.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}
