//! Display formatting of raw cell values.

use chrono::{Local, TimeZone};
use serde_json::Value;

/// Formats a number the way it reads in a spreadsheet cell: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn number_string(n: f64) -> String {
    if n == 0.0 {
        // normalizes -0
        return "0".to_string();
    }
    n.to_string()
}

/// Converts a raw cell value to display text using the local time zone.
///
/// See [`cell_text_in`].
pub fn cell_text(value: &Value) -> String {
    cell_text_in(value, &Local)
}

/// Converts a raw cell value to display text.
///
/// - `null` becomes an empty string.
/// - Integers with exactly 13 digits are millisecond timestamps and are
///   rendered as `YYYY-MM-DD` in `tz`.
/// - Arrays (multi-select, people, links) join each item's `text` or
///   `name` with `", "`.
/// - Objects yield their `text` member.
/// - Everything else is stringified.
pub fn cell_text_in<Tz: TimeZone>(value: &Value, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(ms) = n.as_i64().filter(|ms| ms.to_string().len() == 13) {
                if let Some(dt) = tz.timestamp_millis_opt(ms).single() {
                    return dt.format("%Y-%m-%d").to_string();
                }
            }
            match n.as_f64() {
                Some(f) => number_string(f),
                None => n.to_string(),
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map
                    .get("text")
                    .or_else(|| map.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                other => cell_text_in(other, tz),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
